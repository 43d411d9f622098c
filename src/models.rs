use crate::{error::ApiError, schema::*};
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDateTime;
use diesel::{prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
	pub status: String,
	pub data: Option<T>,
	pub error: Option<String>,
}

impl<T> ApiResponse<T> {
	pub fn success(data: T) -> Self {
		Self { status: "success".to_string(), data: Some(data), error: None }
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self { status: "error".to_string(), data: None, error: Some(message.into()) }
	}
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(Sqlite))]
pub struct Category {
	pub id: i32,
	pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategory<'a> {
	pub name: &'a str,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryTotal {
	pub id: i32,
	pub name: String,
	pub total_amount: BigDecimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
	Withdraw,
	Deposit,
}

impl TransactionKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			TransactionKind::Withdraw => "withdraw",
			TransactionKind::Deposit => "deposit",
		}
	}

	/// Applies the sign this kind contributes to a category total.
	pub fn signed(&self, cents: i64) -> i64 {
		match self {
			TransactionKind::Withdraw => -cents,
			TransactionKind::Deposit => cents,
		}
	}
}

impl FromStr for TransactionKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"withdraw" => Ok(TransactionKind::Withdraw),
			"deposit" => Ok(TransactionKind::Deposit),
			other => Err(format!("unknown transaction type '{}'", other)),
		}
	}
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = transactions)]
#[diesel(belongs_to(Category))]
#[diesel(check_for_backend(Sqlite))]
pub struct Transaction {
	pub id: i32,
	pub title: String,
	pub kind: String,
	pub amount_cents: i64,
	pub category_id: i32,
	pub created_at: NaiveDateTime,
}

impl Transaction {
	pub fn amount(&self) -> BigDecimal {
		cents_to_amount(self.amount_cents)
	}

	/// Rows are only written through [`TransactionKind::as_str`], and the table
	/// has a CHECK constraint on the column.
	pub fn kind(&self) -> Result<TransactionKind, ApiError> {
		self.kind.parse().map_err(ApiError::Internal)
	}
}

#[derive(Insertable, Debug)]
#[diesel(table_name = transactions)]
pub struct NewTransaction<'a> {
	pub title: &'a str,
	pub kind: &'a str,
	pub amount_cents: i64,
	pub category_id: i32,
	pub created_at: NaiveDateTime,
}

/// A ledger transaction as returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionView {
	pub id: i32,
	pub title: String,
	#[serde(rename = "type")]
	pub kind: TransactionKind,
	pub amount: BigDecimal,
	pub category_id: i32,
	pub category: String,
	pub created_at: NaiveDateTime,
}

impl TransactionView {
	pub fn new(transaction: Transaction, category: String) -> Result<Self, ApiError> {
		Ok(Self {
			kind: transaction.kind()?,
			amount: transaction.amount(),
			id: transaction.id,
			title: transaction.title,
			category_id: transaction.category_id,
			category,
			created_at: transaction.created_at,
		})
	}
}

/// The eleven measurements of a clinical record, already validated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ClinicalInput {
	pub age: i32,
	pub sex: i32,
	pub chest_pain_type: i32,
	pub resting_bp: i32,
	pub cholesterol: i32,
	pub fasting_bs: i32,
	pub resting_ecg: i32,
	pub max_hr: i32,
	pub exercise_angina: i32,
	pub oldpeak: f64,
	pub st_slope: i32,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = clinical_transactions)]
#[diesel(check_for_backend(Sqlite))]
pub struct ClinicalTransaction {
	pub id: i32,
	pub age: i32,
	pub sex: i32,
	pub chest_pain_type: i32,
	pub resting_bp: i32,
	pub cholesterol: i32,
	pub fasting_bs: i32,
	pub resting_ecg: i32,
	pub max_hr: i32,
	pub exercise_angina: i32,
	pub oldpeak: f64,
	pub st_slope: i32,
	pub heart_disease: i32,
	pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = clinical_transactions)]
pub struct NewClinicalTransaction {
	pub age: i32,
	pub sex: i32,
	pub chest_pain_type: i32,
	pub resting_bp: i32,
	pub cholesterol: i32,
	pub fasting_bs: i32,
	pub resting_ecg: i32,
	pub max_hr: i32,
	pub exercise_angina: i32,
	pub oldpeak: f64,
	pub st_slope: i32,
	pub heart_disease: i32,
	pub created_at: NaiveDateTime,
}

impl NewClinicalTransaction {
	pub fn new(input: ClinicalInput, heart_disease: i32, created_at: NaiveDateTime) -> Self {
		Self {
			age: input.age,
			sex: input.sex,
			chest_pain_type: input.chest_pain_type,
			resting_bp: input.resting_bp,
			cholesterol: input.cholesterol,
			fasting_bs: input.fasting_bs,
			resting_ecg: input.resting_ecg,
			max_hr: input.max_hr,
			exercise_angina: input.exercise_angina,
			oldpeak: input.oldpeak,
			st_slope: input.st_slope,
			heart_disease,
			created_at,
		}
	}
}

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct CategoryPayload {
	#[validate(
		required(message = "Missing name parameter"),
		length(min = 1, message = "name must not be empty")
	)]
	pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct TransactionPayload {
	#[validate(required(message = "title is required"))]
	pub title: Option<String>,
	/// Presence is checked in `into_valid` so the error is keyed `type`.
	#[serde(rename = "type")]
	pub kind: Option<String>,
	#[validate(required(message = "amount is required"))]
	pub amount: Option<serde_json::Number>,
	#[validate(required(message = "category_id is required"))]
	pub category_id: Option<i32>,
}

/// Body of a clinical create request. There is no `heart_disease` field, so a
/// label sent by the client is ignored.
#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct ClinicalPayload {
	#[validate(required)]
	pub age: Option<i32>,
	#[validate(required)]
	pub sex: Option<i32>,
	#[validate(required)]
	pub chest_pain_type: Option<i32>,
	#[validate(required)]
	pub resting_bp: Option<i32>,
	#[validate(required)]
	pub cholesterol: Option<i32>,
	#[validate(required)]
	pub fasting_bs: Option<i32>,
	#[validate(required)]
	pub resting_ecg: Option<i32>,
	#[validate(required)]
	pub max_hr: Option<i32>,
	#[validate(required)]
	pub exercise_angina: Option<i32>,
	#[validate(required)]
	pub oldpeak: Option<f64>,
	#[validate(required)]
	pub st_slope: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
	Asc,
	Desc,
}

impl FromStr for SortOrder {
	type Err = ApiError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"asc" => Ok(SortOrder::Asc),
			"desc" => Ok(SortOrder::Desc),
			_ => Err(ApiError::InvalidArgument(
				"Invalid order_by parameter. Use \"asc\" or \"desc\".".to_string(),
			)),
		}
	}
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct ListParams {
	pub order_by: Option<String>,
}

impl ListParams {
	pub fn order(&self) -> Result<SortOrder, ApiError> {
		self.order_by.as_deref().map_or(Ok(SortOrder::Asc), str::parse)
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MappingEntry {
	pub field: String,
	pub mapping: serde_json::Map<String, serde_json::Value>,
}

pub fn cents_to_amount(cents: impl Into<BigDecimal>) -> BigDecimal {
	(cents.into() / BigDecimal::from(100)).with_scale(2)
}

/// `None` when the amount does not fit in an `i64` number of cents. Digits
/// past the second decimal place are dropped, so callers validate scale first.
pub fn amount_to_cents(amount: &BigDecimal) -> Option<i64> {
	(amount.with_scale(2) * BigDecimal::from(100)).to_i64()
}
