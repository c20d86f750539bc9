use crate::domain::activity::{Activity, NewActivity, UpdateActivity};
use crate::domain::types::{ActivityId, ContactId};
use crate::dto::api::{ListPage, ListParams};
use crate::forms::DeleteForm;
use crate::forms::activity::{AddActivityForm, SaveActivityForm};
use crate::notifications::{Notice, Notifier};
use crate::remote::params::SortDirection;
use crate::repository::{ActivityReader, ActivityWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, list_page, list_query};

/// Loads one page of activities filtered by description and type.
pub async fn load_activities_page<R>(
    repo: &R,
    params: ListParams,
    per_page: usize,
) -> ListPage<Activity>
where
    R: ActivityReader,
{
    let result = repo.list_activities(list_query(&params, per_page)).await;
    list_page(params, per_page, result)
}

/// Activities logged against the contact, newest first.
pub async fn contact_timeline<R>(repo: &R, contact_id: i32) -> ServiceResult<Vec<Activity>>
where
    R: ActivityReader,
{
    let contact_id = ContactId::new(contact_id)?;
    let query = ListQuery::new()
        .contact(contact_id)
        .sort_by("Id", SortDirection::Desc);
    let (_total, activities) = repo.list_activities(query).await;
    Ok(activities)
}

pub async fn get_activity<R>(repo: &R, activity_id: i32) -> ServiceResult<Activity>
where
    R: ActivityReader,
{
    let activity_id = ActivityId::new(activity_id)?;
    repo.get_activity_by_id(activity_id)
        .await
        .ok_or(ServiceError::NotFound)
}

pub async fn create_activity<R, N>(
    repo: &R,
    notifier: &N,
    form: AddActivityForm,
) -> ServiceResult<Activity>
where
    R: ActivityWriter,
    N: Notifier,
{
    let new_activity = NewActivity::try_from(form)?;

    let activity = repo
        .create_activity(&new_activity)
        .await
        .ok_or_else(|| ServiceError::Rejected("Failed to create activity".to_string()))?;
    notifier.notify(Notice::success("Activity created successfully"));
    Ok(activity)
}

pub async fn update_activity<R, N>(
    repo: &R,
    notifier: &N,
    activity_id: i32,
    form: SaveActivityForm,
) -> ServiceResult<Activity>
where
    R: ActivityWriter,
    N: Notifier,
{
    let activity_id = ActivityId::new(activity_id)?;
    let updates = UpdateActivity::try_from(form)?;

    let activity = repo
        .update_activity(activity_id, &updates)
        .await
        .ok_or_else(|| ServiceError::Rejected("Failed to update activity".to_string()))?;
    notifier.notify(Notice::success("Activity updated successfully"));
    Ok(activity)
}

pub async fn delete_activities<R, N>(repo: &R, notifier: &N, form: DeleteForm) -> ServiceResult<()>
where
    R: ActivityWriter,
    N: Notifier,
{
    let ids = form.into_ids::<ActivityId>()?;

    if !repo.delete_activities(&ids).await {
        return Err(ServiceError::Rejected("Failed to delete activity".to_string()));
    }
    notifier.notify(Notice::success("Activity deleted successfully"));
    Ok(())
}
