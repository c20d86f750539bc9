#![allow(dead_code)]

use crm_gateway::remote::memory::InMemoryClient;
use serde_json::json;

/// In-memory backend with two contacts, three deals and a few activities.
pub fn crm_fixture() -> InMemoryClient {
    let client = InMemoryClient::crm();
    client.seed(
        "companies_c",
        [
            json!({"companyName": "Acme", "industry": "Retail", "city": "Austin"}),
            json!({"companyName": "Globex", "industry": "Energy", "city": "Boston"}),
        ],
    );
    client.seed(
        "contact_c",
        [
            json!({
                "Name": "Jane Roe",
                "first_name_c": "Jane",
                "last_name_c": "Roe",
                "email_c": "jane@acme.test",
                "company_c": "Acme",
                "status_c": "Lead",
            }),
            json!({
                "Name": "John Doe",
                "first_name_c": "John",
                "last_name_c": "Doe",
                "email_c": "john@globex.test",
                "company_c": "Globex",
                "status_c": "Customer",
            }),
        ],
    );
    client.seed(
        "deal_c",
        [
            json!({"Name": "Renewal", "title_c": "Renewal", "stage_c": "Proposal", "value_c": 1000, "probability_c": 40, "contactId_c": 1}),
            json!({"Name": "Upsell", "title_c": "Upsell", "stage_c": "Closed Won", "value_c": 2500, "probability_c": 100, "contactId_c": 2}),
            json!({"Name": "Pilot", "title_c": "Pilot", "stage_c": "Qualification", "value_c": "300.5", "contactId_c": 1}),
        ],
    );
    client.seed(
        "activity_c",
        [
            json!({"Name": "call - Intro", "contact_id_c": 1, "type_c": "call", "description_c": "Intro"}),
            json!({"Name": "email - Pricing", "contact_id_c": 1, "type_c": "email", "description_c": "Pricing sent"}),
            json!({"Name": "note - Renewal", "contact_id_c": 2, "type_c": "note", "description_c": "Renewal terms"}),
        ],
    );
    client
}
