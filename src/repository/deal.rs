use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::types::DealId;
use crate::models::deal::{DealRecord, DealTable};
use crate::notifications::Notifier;
use crate::remote::RecordClient;
use crate::repository::{DealReader, DealWriter, ListQuery, RemoteRepository};

impl<C, N> DealReader for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn get_deal_by_id(&self, id: DealId) -> Option<Deal> {
        self.get::<DealTable>(id.get()).await
    }

    async fn list_deals(&self, query: ListQuery) -> (usize, Vec<Deal>) {
        self.list::<DealTable>(&query).await
    }
}

impl<C, N> DealWriter for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn create_deal(&self, deal: &NewDeal) -> Option<Deal> {
        let record = DealRecord::from(deal);
        self.create::<DealTable>(&record).await
    }

    async fn update_deal(&self, id: DealId, updates: &UpdateDeal) -> Option<Deal> {
        let record = DealRecord::from((id, updates));
        self.update::<DealTable>(&record).await
    }

    async fn delete_deals(&self, ids: &[DealId]) -> bool {
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        self.delete::<DealTable>(&ids).await
    }
}
