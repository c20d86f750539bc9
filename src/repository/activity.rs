use crate::domain::activity::{Activity, NewActivity, UpdateActivity};
use crate::domain::types::ActivityId;
use crate::models::activity::{ActivityRecord, ActivityTable};
use crate::notifications::Notifier;
use crate::remote::RecordClient;
use crate::repository::{ActivityReader, ActivityWriter, ListQuery, RemoteRepository};

impl<C, N> ActivityReader for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn get_activity_by_id(&self, id: ActivityId) -> Option<Activity> {
        self.get::<ActivityTable>(id.get()).await
    }

    async fn list_activities(&self, query: ListQuery) -> (usize, Vec<Activity>) {
        self.list::<ActivityTable>(&query).await
    }
}

impl<C, N> ActivityWriter for RemoteRepository<'_, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    async fn create_activity(&self, activity: &NewActivity) -> Option<Activity> {
        let record = ActivityRecord::from(activity);
        self.create::<ActivityTable>(&record).await
    }

    async fn update_activity(&self, id: ActivityId, updates: &UpdateActivity) -> Option<Activity> {
        let record = ActivityRecord::from((id, updates));
        self.update::<ActivityTable>(&record).await
    }

    async fn delete_activities(&self, ids: &[ActivityId]) -> bool {
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        self.delete::<ActivityTable>(&ids).await
    }
}
