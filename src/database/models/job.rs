use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Row of the `jobs` table. Equity serializes as a decimal string, e.g. `"0.1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
    #[validate(length(min = 1, max = 25))]
    pub company_handle: String,
}

/// Body of `PATCH /jobs/:id`. Neither the id nor the company can change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
}

impl super::PatchFields for JobUpdate {
    const NULLABLE: &'static [&'static str] = &["salary", "equity"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn equity_serializes_as_string() {
        let job = Job {
            id: 1,
            title: "job1".into(),
            salary: Some(100),
            equity: Some(Decimal::from_str("0.1").unwrap()),
            company_handle: "c1".into(),
        };
        let v = serde_json::to_value(&job).unwrap();
        assert_eq!(v["equity"], json!("0.1"));
        assert_eq!(v["companyHandle"], json!("c1"));
    }

    #[test]
    fn equity_above_one_is_invalid() {
        let job: NewJob = serde_json::from_value(json!({
            "title": "t",
            "equity": 1.5,
            "companyHandle": "c1"
        }))
        .unwrap();
        assert!(job.validate().is_err());
    }

    #[test]
    fn update_refuses_company_handle() {
        assert!(serde_json::from_value::<JobUpdate>(json!({"companyHandle": "c2"})).is_err());
        assert!(serde_json::from_value::<JobUpdate>(json!({"id": 4})).is_err());
    }
}
