use std::{borrow::Cow, str::FromStr};

use bigdecimal::{BigDecimal, Zero};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{
	amount_to_cents, CategoryPayload, ClinicalInput, ClinicalPayload, TransactionKind,
	TransactionPayload,
};

/// A ledger transaction that passed every field check. Category existence is
/// checked later, inside the insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
	pub title: String,
	pub kind: TransactionKind,
	pub amount_cents: i64,
	pub category_id: i32,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
	ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Collects derive-level errors, or an empty set when those all passed.
fn base_errors<T: Validate>(payload: &T) -> ValidationErrors {
	payload.validate().err().unwrap_or_else(ValidationErrors::new)
}

fn trimmed(value: Option<&str>) -> Option<&str> {
	value.map(str::trim)
}

impl CategoryPayload {
	pub fn into_valid(self) -> Result<String, ValidationErrors> {
		let mut errors = base_errors(&self);
		let name = trimmed(self.name.as_deref());
		if name == Some("") && !errors.field_errors().contains_key("name") {
			errors.add("name", field_error("blank", "name must not be empty"));
		}
		match name {
			Some(name) if errors.is_empty() => Ok(name.to_string()),
			_ => Err(errors),
		}
	}
}

impl TransactionPayload {
	pub fn into_valid(self) -> Result<ValidTransaction, ValidationErrors> {
		let mut errors = base_errors(&self);

		let title = trimmed(self.title.as_deref());
		if title == Some("") {
			errors.add("title", field_error("blank", "title must not be empty"));
		}

		let kind = match self.kind.as_deref().map(TransactionKind::from_str) {
			Some(Ok(kind)) => Some(kind),
			Some(Err(_)) => {
				errors.add("type", field_error("choice", "type must be 'withdraw' or 'deposit'"));
				None
			},
			None => {
				errors.add("type", field_error("required", "type is required"));
				None
			},
		};

		let amount_cents = match self.amount.as_ref().map(parse_amount) {
			Some(Ok(cents)) => Some(cents),
			Some(Err(e)) => {
				errors.add("amount", e);
				None
			},
			None => None,
		};

		match (title, kind, amount_cents, self.category_id) {
			(Some(title), Some(kind), Some(amount_cents), Some(category_id)) if errors.is_empty() =>
				Ok(ValidTransaction { title: title.to_string(), kind, amount_cents, category_id }),
			_ => Err(errors),
		}
	}
}

/// Amounts must be strictly positive with at most two fractional digits.
/// Extra precision is rejected rather than rounded.
pub fn parse_amount(number: &serde_json::Number) -> Result<i64, ValidationError> {
	let amount = BigDecimal::from_str(&number.to_string())
		.map_err(|_| field_error("number", "amount must be a decimal number"))?;
	if amount <= BigDecimal::zero() {
		return Err(field_error("range", "amount must be greater than zero"));
	}
	let (_, scale) = amount.normalized().as_bigint_and_exponent();
	if scale > 2 {
		return Err(field_error("precision", "amount must have at most 2 decimal places"));
	}
	amount_to_cents(&amount).ok_or_else(|| field_error("range", "amount is too large"))
}

impl ClinicalPayload {
	pub fn into_valid(self) -> Result<ClinicalInput, ValidationErrors> {
		self.validate()?;
		self.complete().ok_or_else(ValidationErrors::new)
	}

	fn complete(&self) -> Option<ClinicalInput> {
		Some(ClinicalInput {
			age: self.age?,
			sex: self.sex?,
			chest_pain_type: self.chest_pain_type?,
			resting_bp: self.resting_bp?,
			cholesterol: self.cholesterol?,
			fasting_bs: self.fasting_bs?,
			resting_ecg: self.resting_ecg?,
			max_hr: self.max_hr?,
			exercise_angina: self.exercise_angina?,
			oldpeak: self.oldpeak?,
			st_slope: self.st_slope?,
		})
	}
}
