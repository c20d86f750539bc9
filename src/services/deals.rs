use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::types::{ContactId, DealId};
use crate::dto::api::{ListPage, ListParams};
use crate::forms::DeleteForm;
use crate::forms::deal::{AddDealForm, SaveDealForm};
use crate::notifications::{Notice, Notifier};
use crate::repository::{DealReader, DealWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, list_page, list_query};

/// Loads one page of deals filtered by title and stage.
pub async fn load_deals_page<R>(repo: &R, params: ListParams, per_page: usize) -> ListPage<Deal>
where
    R: DealReader,
{
    let result = repo.list_deals(list_query(&params, per_page)).await;
    list_page(params, per_page, result)
}

/// Every deal linked to the contact.
pub async fn list_contact_deals<R>(repo: &R, contact_id: i32) -> ServiceResult<Vec<Deal>>
where
    R: DealReader,
{
    let contact_id = ContactId::new(contact_id)?;
    let (_total, deals) = repo.list_deals(ListQuery::new().contact(contact_id)).await;
    Ok(deals)
}

pub async fn get_deal<R>(repo: &R, deal_id: i32) -> ServiceResult<Deal>
where
    R: DealReader,
{
    let deal_id = DealId::new(deal_id)?;
    repo.get_deal_by_id(deal_id)
        .await
        .ok_or(ServiceError::NotFound)
}

pub async fn create_deal<R, N>(repo: &R, notifier: &N, form: AddDealForm) -> ServiceResult<Deal>
where
    R: DealWriter,
    N: Notifier,
{
    let new_deal = NewDeal::try_from(form)?;

    match repo.create_deal(&new_deal).await {
        Some(deal) => {
            notifier.notify(Notice::success("Deal created successfully"));
            Ok(deal)
        }
        None => Err(ServiceError::Rejected("Failed to create deal".to_string())),
    }
}

pub async fn update_deal<R, N>(
    repo: &R,
    notifier: &N,
    deal_id: i32,
    form: SaveDealForm,
) -> ServiceResult<Deal>
where
    R: DealWriter,
    N: Notifier,
{
    let deal_id = DealId::new(deal_id)?;
    let updates = UpdateDeal::try_from(form)?;

    match repo.update_deal(deal_id, &updates).await {
        Some(deal) => {
            notifier.notify(Notice::success("Deal updated successfully"));
            Ok(deal)
        }
        None => Err(ServiceError::Rejected("Failed to update deal".to_string())),
    }
}

pub async fn delete_deals<R, N>(repo: &R, notifier: &N, form: DeleteForm) -> ServiceResult<()>
where
    R: DealWriter,
    N: Notifier,
{
    let ids = form.into_ids::<DealId>()?;

    if repo.delete_deals(&ids).await {
        notifier.notify(Notice::success("Deal deleted successfully"));
        Ok(())
    } else {
        Err(ServiceError::Rejected("Failed to delete deal".to_string()))
    }
}
