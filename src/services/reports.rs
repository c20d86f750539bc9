//! Analytics computed from the contact and deal tables.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::domain::contact::Contact;
use crate::domain::deal::{Deal, DealStage};
use crate::dto::reports::{
    Analytics, LeadGeneration, MonthlyLeads, PipelineAnalysis, StageSummary, Timeframe,
};
use crate::repository::{ContactReader, DealReader, ListQuery};

/// Rows requested per call while reading a whole table.
const ANALYTICS_PAGE_SIZE: usize = 100;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First days of every month from `months` back up to the month of `now`.
fn month_starts(now: DateTime<Utc>, months: u32) -> Vec<NaiveDate> {
    let Some(current) = NaiveDate::from_ymd_opt(now.year(), now.month(), 1) else {
        return Vec::new();
    };
    let Some(first) = current.checked_sub_months(Months::new(months)) else {
        return vec![current];
    };
    (0..=months)
        .filter_map(|offset| first.checked_add_months(Months::new(offset)))
        .collect()
}

/// New contacts per calendar month of the window.
pub fn lead_generation(contacts: &[Contact], now: DateTime<Utc>, months: u32) -> LeadGeneration {
    let monthly: Vec<MonthlyLeads> = month_starts(now, months)
        .into_iter()
        .map(|month| {
            let new_leads = contacts
                .iter()
                .filter_map(|contact| contact.created_at)
                .filter(|created| {
                    created.year() == month.year() && created.month() == month.month()
                })
                .count();
            MonthlyLeads { month, new_leads }
        })
        .collect();

    let total_new_leads: usize = monthly.iter().map(|m| m.new_leads).sum();
    let monthly_average = if monthly.is_empty() {
        0
    } else {
        (total_new_leads as f64 / monthly.len() as f64).round() as usize
    };

    let trend = match monthly.as_slice() {
        [.., previous, current] if previous.new_leads > 0 => {
            let previous = previous.new_leads as f64;
            round2((current.new_leads as f64 - previous) / previous * 100.0)
        }
        _ => 0.0,
    };

    LeadGeneration {
        monthly,
        monthly_average,
        total_new_leads,
        trend,
    }
}

/// Value and stage breakdown of the pipeline.
pub fn pipeline_analysis(deals: &[Deal]) -> PipelineAnalysis {
    let open: Vec<&Deal> = deals.iter().filter(|d| !d.stage.is_closed()).collect();
    let total_value: f64 = open.iter().map(|d| d.value).sum();
    let average_deal_size = if open.is_empty() {
        0.0
    } else {
        round2(total_value / open.len() as f64)
    };

    let stages = DealStage::pipeline()
        .into_iter()
        .map(|stage| {
            let in_stage = deals.iter().filter(|d| d.stage == stage);
            StageSummary {
                count: in_stage.clone().count(),
                value: in_stage.map(|d| d.value).sum(),
                stage,
            }
        })
        .collect();

    PipelineAnalysis {
        total_value,
        average_deal_size,
        open_deals: open.len(),
        weighted_value: round2(open.iter().map(|d| d.weighted_value()).sum()),
        won_revenue: deals
            .iter()
            .filter(|d| d.stage == DealStage::ClosedWon)
            .map(|d| d.value)
            .sum(),
        stages,
    }
}

/// Builds the analytics report for the timeframe ending at `now`.
/// Reads every page of a list until the reported total is reached.
async fn collect_pages<T, F, Fut>(per_page: usize, mut fetch: F) -> Vec<T>
where
    F: FnMut(ListQuery) -> Fut,
    Fut: Future<Output = (usize, Vec<T>)>,
{
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let (total, batch) = fetch(ListQuery::new().paginate(page, per_page)).await;
        let received = batch.len();
        items.extend(batch);
        if received == 0 || items.len() >= total || page.saturating_mul(per_page) >= total {
            break;
        }
        page += 1;
    }
    items
}

pub async fn load_analytics<R>(repo: &R, timeframe: Timeframe, now: DateTime<Utc>) -> Analytics
where
    R: ContactReader + DealReader,
{
    let contacts =
        collect_pages(ANALYTICS_PAGE_SIZE, move |query| repo.list_contacts(query)).await;
    let deals = collect_pages(ANALYTICS_PAGE_SIZE, move |query| repo.list_deals(query)).await;
    log::debug!(
        "Building analytics over {} contacts and {} deals",
        contacts.len(),
        deals.len()
    );

    Analytics {
        timeframe,
        lead_generation: lead_generation(&contacts, now, timeframe.months()),
        pipeline_analysis: pipeline_analysis(&deals),
        generated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::domain::contact::ContactStatus;
    use crate::domain::types::{ContactId, DealId};
    use crate::notifications::NoticeLog;
    use crate::remote::memory::InMemoryClient;
    use crate::repository::RemoteRepository;

    fn contact(id: i32, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id: ContactId::new(id).unwrap(),
            first_name: format!("Lead {id}"),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            status: ContactStatus::Lead,
            created_at: Some(created_at),
            last_activity: None,
        }
    }

    fn deal(id: i32, stage: DealStage, value: f64, probability: i32) -> Deal {
        Deal {
            id: DealId::new(id).unwrap(),
            title: format!("Deal {id}"),
            description: String::new(),
            contact_id: None,
            contact_name: None,
            value,
            stage,
            probability,
            expected_close_date: None,
            created_at: None,
        }
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn window_spans_the_current_month() {
        let months = month_starts(at(2025, 2, 14), 3);
        assert_eq!(
            months,
            vec![
                NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn leads_are_bucketed_by_month() {
        let contacts = vec![
            contact(1, at(2025, 1, 3)),
            contact(2, at(2025, 1, 20)),
            contact(3, at(2025, 2, 1)),
            contact(4, at(2025, 2, 10)),
            contact(5, at(2025, 2, 11)),
            contact(6, at(2023, 5, 1)),
        ];

        let leads = lead_generation(&contacts, at(2025, 2, 14), 3);

        let counts: Vec<usize> = leads.monthly.iter().map(|m| m.new_leads).collect();
        assert_eq!(counts, vec![0, 0, 2, 3]);
        assert_eq!(leads.total_new_leads, 5);
        assert_eq!(leads.monthly_average, 1);
        assert_eq!(leads.trend, 50.0);
    }

    #[test]
    fn trend_is_zero_without_previous_leads() {
        let contacts = vec![contact(1, at(2025, 2, 3))];
        let leads = lead_generation(&contacts, at(2025, 2, 14), 6);

        assert_eq!(leads.monthly.len(), 7);
        assert_eq!(leads.trend, 0.0);
    }

    #[test]
    fn trend_rounds_to_two_decimals() {
        let contacts = vec![
            contact(1, at(2025, 1, 3)),
            contact(2, at(2025, 1, 4)),
            contact(3, at(2025, 1, 5)),
            contact(4, at(2025, 2, 3)),
        ];
        let leads = lead_generation(&contacts, at(2025, 2, 14), 3);

        assert_eq!(leads.trend, -66.67);
    }

    #[test]
    fn pipeline_excludes_closed_deals_from_open_value() {
        let deals = vec![
            deal(1, DealStage::Prospecting, 1000.0, 10),
            deal(2, DealStage::Negotiation, 3000.0, 50),
            deal(3, DealStage::ClosedWon, 5000.0, 100),
            deal(4, DealStage::ClosedLost, 700.0, 0),
        ];

        let pipeline = pipeline_analysis(&deals);

        assert_eq!(pipeline.total_value, 4000.0);
        assert_eq!(pipeline.open_deals, 2);
        assert_eq!(pipeline.average_deal_size, 2000.0);
        assert_eq!(pipeline.weighted_value, 1600.0);
        assert_eq!(pipeline.won_revenue, 5000.0);
        assert_eq!(pipeline.stages.len(), 6);
        assert_eq!(pipeline.stages[3].stage, DealStage::Negotiation);
        assert_eq!(pipeline.stages[3].count, 1);
        assert_eq!(pipeline.stages[4].value, 5000.0);
    }

    #[test]
    fn empty_pipeline() {
        let pipeline = pipeline_analysis(&[]);
        assert_eq!(pipeline.average_deal_size, 0.0);
        assert!(pipeline.stages.iter().all(|s| s.count == 0));
    }

    #[actix_rt::test]
    async fn analytics_read_both_tables() {
        let client = InMemoryClient::crm();
        client.seed(
            "contact_c",
            [
                json!({"first_name_c": "Jane", "created_at_c": "2025-02-02T10:00:00Z"}),
                json!({"first_name_c": "John", "created_at_c": "2025-01-02T10:00:00Z"}),
            ],
        );
        client.seed(
            "deal_c",
            [json!({"title_c": "Renewal", "stage_c": "Proposal", "value_c": 250})],
        );
        let notices = NoticeLog::new();
        let repo = RemoteRepository::new(&client, &notices);

        let analytics = load_analytics(&repo, Timeframe::ThreeMonths, at(2025, 2, 14)).await;

        assert_eq!(analytics.lead_generation.total_new_leads, 2);
        assert_eq!(analytics.pipeline_analysis.total_value, 250.0);
        assert_eq!(analytics.generated_at, at(2025, 2, 14));
        assert!(notices.is_empty());
    }

    #[actix_rt::test]
    async fn pages_are_collected_until_the_total() {
        let client = InMemoryClient::crm();
        client.seed(
            "deal_c",
            (1..=5).map(|n| json!({"title_c": format!("Deal {n}"), "value_c": n})),
        );
        let notices = NoticeLog::new();
        let repo = RemoteRepository::new(&client, &notices);
        let repo = &repo;
        let requests = Cell::new(0);
        let counter = &requests;

        let deals = collect_pages(2, move |query| {
            counter.set(counter.get() + 1);
            repo.list_deals(query)
        })
        .await;

        assert_eq!(deals.len(), 5);
        assert_eq!(requests.get(), 3);
    }

    #[actix_rt::test]
    async fn analytics_cover_more_rows_than_one_page() {
        let client = InMemoryClient::crm();
        client.seed(
            "contact_c",
            (0..ANALYTICS_PAGE_SIZE + 30).map(|_| {
                json!({"first_name_c": "Lead", "created_at_c": "2025-02-02T10:00:00Z"})
            }),
        );
        client.seed(
            "deal_c",
            (0..ANALYTICS_PAGE_SIZE + 5)
                .map(|_| json!({"title_c": "Pilot", "stage_c": "Proposal", "value_c": 10})),
        );
        let notices = NoticeLog::new();
        let repo = RemoteRepository::new(&client, &notices);

        let analytics = load_analytics(&repo, Timeframe::ThreeMonths, at(2025, 2, 14)).await;

        assert_eq!(analytics.lead_generation.total_new_leads, ANALYTICS_PAGE_SIZE + 30);
        assert_eq!(analytics.pipeline_analysis.open_deals, ANALYTICS_PAGE_SIZE + 5);
        assert_eq!(analytics.pipeline_analysis.total_value, 1050.0);
    }
}
