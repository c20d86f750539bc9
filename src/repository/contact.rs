use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::ContactId;
use crate::models::contact::{ContactRecord, ContactTable};
use crate::notifications::Notifier;
use crate::remote::RecordClient;
use crate::repository::{ContactReader, ContactWriter, ListQuery, RemoteRepository};

impl<C, N> ContactReader for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn get_contact_by_id(&self, id: ContactId) -> Option<Contact> {
        self.get::<ContactTable>(id.get()).await
    }

    async fn list_contacts(&self, query: ListQuery) -> (usize, Vec<Contact>) {
        self.list::<ContactTable>(&query).await
    }
}

impl<C, N> ContactWriter for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn create_contact(&self, contact: &NewContact) -> Option<Contact> {
        let record = ContactRecord::from(contact);
        self.create::<ContactTable>(&record).await
    }

    async fn update_contact(&self, id: ContactId, updates: &UpdateContact) -> Option<Contact> {
        let record = ContactRecord::from((id, updates));
        self.update::<ContactTable>(&record).await
    }

    async fn delete_contacts(&self, ids: &[ContactId]) -> bool {
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        self.delete::<ContactTable>(&ids).await
    }
}
