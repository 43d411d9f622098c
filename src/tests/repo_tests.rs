use bigdecimal::BigDecimal;
use chrono::Utc;
use std::str::FromStr;

use crate::{
	models::{Category, Transaction},
	repo::category_totals,
};

fn amount(value: &str) -> BigDecimal {
	BigDecimal::from_str(value).unwrap()
}

fn row(id: i32, kind: &str, amount_cents: i64, category_id: i32) -> Transaction {
	Transaction {
		id,
		title: format!("t{}", id),
		kind: kind.to_string(),
		amount_cents,
		category_id,
		created_at: Utc::now().naive_utc(),
	}
}

fn categories() -> Vec<Category> {
	vec![Category { id: 1, name: "Food".to_string() }, Category { id: 2, name: "Rent".to_string() }]
}

#[test]
fn test_category_totals_are_signed_per_category() {
	let transactions = vec![
		row(1, "deposit", 10_000, 1),
		row(2, "withdraw", 3_000, 1),
		row(3, "withdraw", 125_050, 2),
		row(4, "deposit", 55, 1),
	];

	let totals = category_totals(&categories(), &transactions).unwrap();

	assert_eq!(totals[0].total_amount, amount("70.55"));
	assert_eq!(totals[1].total_amount, amount("-1250.50"));
}

#[test]
fn test_category_totals_beyond_i64_cents() {
	let transactions = vec![
		row(1, "deposit", i64::MAX, 1),
		row(2, "deposit", i64::MAX, 1),
		row(3, "withdraw", i64::MAX, 2),
		row(4, "withdraw", i64::MAX, 2),
	];

	let totals = category_totals(&categories(), &transactions).unwrap();

	assert_eq!(totals[0].total_amount, amount("184467440737095516.14"));
	assert_eq!(totals[1].total_amount, amount("-184467440737095516.14"));
}

#[test]
fn test_category_without_transactions_totals_zero() {
	let totals = category_totals(&categories(), &[row(1, "deposit", 500, 1)]).unwrap();

	assert_eq!(totals.len(), 2);
	assert_eq!(totals[0].total_amount, amount("5.00"));
	assert_eq!(totals[1].total_amount, BigDecimal::from(0));
}
