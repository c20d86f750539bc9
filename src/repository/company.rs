use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::types::CompanyId;
use crate::models::company::{CompanyRecord, CompanyTable};
use crate::notifications::Notifier;
use crate::remote::RecordClient;
use crate::repository::{CompanyReader, CompanyWriter, ListQuery, RemoteRepository};

impl<C, N> CompanyReader for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn get_company_by_id(&self, id: CompanyId) -> Option<Company> {
        self.get::<CompanyTable>(id.get()).await
    }

    async fn list_companies(&self, query: ListQuery) -> (usize, Vec<Company>) {
        self.list::<CompanyTable>(&query).await
    }
}

impl<C, N> CompanyWriter for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn create_company(&self, company: &NewCompany) -> Option<Company> {
        let record = CompanyRecord::from(company);
        self.create::<CompanyTable>(&record).await
    }

    async fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> Option<Company> {
        let record = CompanyRecord::from((id, updates));
        self.update::<CompanyTable>(&record).await
    }

    async fn delete_companies(&self, ids: &[CompanyId]) -> bool {
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        self.delete::<CompanyTable>(&ids).await
    }
}
