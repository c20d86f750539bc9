use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::types::CompanyId;
use crate::dto::api::{ListPage, ListParams};
use crate::forms::DeleteForm;
use crate::forms::company::{AddCompanyForm, SaveCompanyForm};
use crate::notifications::{Notice, Notifier};
use crate::repository::{CompanyReader, CompanyWriter};
use crate::services::{ServiceError, ServiceResult, list_page, list_query};

/// Loads one page of companies matching the search term.
pub async fn load_companies_page<R>(
    repo: &R,
    params: ListParams,
    per_page: usize,
) -> ListPage<Company>
where
    R: CompanyReader,
{
    let result = repo.list_companies(list_query(&params, per_page)).await;
    list_page(params, per_page, result)
}

/// Fetches a company by its identifier.
pub async fn get_company<R>(repo: &R, company_id: i32) -> ServiceResult<Company>
where
    R: CompanyReader,
{
    let company_id = CompanyId::new(company_id)?;
    repo.get_company_by_id(company_id)
        .await
        .ok_or(ServiceError::NotFound)
}

pub async fn create_company<R, N>(
    repo: &R,
    notifier: &N,
    form: AddCompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter,
    N: Notifier,
{
    let new_company = NewCompany::try_from(form)?;

    match repo.create_company(&new_company).await {
        Some(company) => {
            notifier.notify(Notice::success("Company created successfully"));
            Ok(company)
        }
        None => Err(ServiceError::Rejected("Failed to create company".to_string())),
    }
}

pub async fn update_company<R, N>(
    repo: &R,
    notifier: &N,
    company_id: i32,
    form: SaveCompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter,
    N: Notifier,
{
    let company_id = CompanyId::new(company_id)?;
    let updates = UpdateCompany::try_from(form)?;

    match repo.update_company(company_id, &updates).await {
        Some(company) => {
            notifier.notify(Notice::success("Company updated successfully"));
            Ok(company)
        }
        None => Err(ServiceError::Rejected("Failed to update company".to_string())),
    }
}

/// Deletes the selected companies.
pub async fn delete_companies<R, N>(repo: &R, notifier: &N, form: DeleteForm) -> ServiceResult<()>
where
    R: CompanyWriter,
    N: Notifier,
{
    let ids = form.into_ids::<CompanyId>()?;

    if repo.delete_companies(&ids).await {
        notifier.notify(Notice::success("Company deleted successfully"));
        Ok(())
    } else {
        Err(ServiceError::Rejected("Failed to delete company".to_string()))
    }
}
