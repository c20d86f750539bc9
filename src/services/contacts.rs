use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::ContactId;
use crate::dto::api::{ListPage, ListParams};
use crate::forms::DeleteForm;
use crate::forms::contact::{AddContactForm, ContactStatusForm, SaveContactForm};
use crate::notifications::{Notice, Notifier};
use crate::repository::{ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult, list_page, list_query};

/// Loads one page of contacts filtered by search term and status.
pub async fn load_contacts_page<R>(
    repo: &R,
    params: ListParams,
    per_page: usize,
) -> ListPage<Contact>
where
    R: ContactReader,
{
    let result = repo.list_contacts(list_query(&params, per_page)).await;
    list_page(params, per_page, result)
}

pub async fn get_contact<R>(repo: &R, contact_id: i32) -> ServiceResult<Contact>
where
    R: ContactReader,
{
    let contact_id = ContactId::new(contact_id)?;
    repo.get_contact_by_id(contact_id)
        .await
        .ok_or(ServiceError::NotFound)
}

pub async fn create_contact<R, N>(
    repo: &R,
    notifier: &N,
    form: AddContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter,
    N: Notifier,
{
    let new_contact = NewContact::try_from(form)?;

    let contact = repo
        .create_contact(&new_contact)
        .await
        .ok_or_else(|| ServiceError::Rejected("Failed to create contact".to_string()))?;
    notifier.notify(Notice::success("Contact created successfully"));
    Ok(contact)
}

pub async fn update_contact<R, N>(
    repo: &R,
    notifier: &N,
    contact_id: i32,
    form: SaveContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter,
    N: Notifier,
{
    let updates = UpdateContact::try_from(form)?;
    save_contact(repo, notifier, contact_id, &updates).await
}

/// Moves a contact to another status, keeping every other column.
pub async fn change_contact_status<R, N>(
    repo: &R,
    notifier: &N,
    contact_id: i32,
    form: ContactStatusForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter,
    N: Notifier,
{
    save_contact(repo, notifier, contact_id, &UpdateContact::from(form)).await
}

async fn save_contact<R, N>(
    repo: &R,
    notifier: &N,
    contact_id: i32,
    updates: &UpdateContact,
) -> ServiceResult<Contact>
where
    R: ContactWriter,
    N: Notifier,
{
    let contact_id = ContactId::new(contact_id)?;

    let contact = repo
        .update_contact(contact_id, updates)
        .await
        .ok_or_else(|| ServiceError::Rejected("Failed to update contact".to_string()))?;
    notifier.notify(Notice::success("Contact updated successfully"));
    Ok(contact)
}

pub async fn delete_contacts<R, N>(repo: &R, notifier: &N, form: DeleteForm) -> ServiceResult<()>
where
    R: ContactWriter,
    N: Notifier,
{
    let ids = form.into_ids::<ContactId>()?;

    if !repo.delete_contacts(&ids).await {
        return Err(ServiceError::Rejected("Failed to delete contact".to_string()));
    }
    notifier.notify(Notice::success("Contact deleted successfully"));
    Ok(())
}
