use crate::{
	error::ApiError,
	models::{
		cents_to_amount, Category, CategoryTotal, ClinicalInput, ClinicalTransaction,
		NewCategory, NewClinicalTransaction, NewTransaction, SortOrder, Transaction,
		TransactionView,
	},
	schema::{categories, clinical_transactions, transactions},
	validation::ValidTransaction,
};
use bigdecimal::{BigDecimal, Zero};
use diesel::{prelude::*, sqlite::SqliteConnection};

pub struct CategoryRepo;

impl CategoryRepo {
	/// Names are unique; a duplicate is rejected before insert and the UNIQUE
	/// constraint backs that up.
	pub fn create_category(conn: &mut SqliteConnection, name: &str) -> Result<Category, ApiError> {
		conn.immediate_transaction(|conn| {
			let existing = categories::table
				.filter(categories::name.eq(name))
				.select(categories::id)
				.first::<i32>(conn)
				.optional()?;
			if let Some(id) = existing {
				log::warn!("Category '{}' already exists with ID: {}", name, id);
				return Err(ApiError::Conflict(format!("Category '{}' already exists", name)));
			}

			let category = diesel::insert_into(categories::table)
				.values(&NewCategory { name })
				.returning(Category::as_returning())
				.get_result(conn)?;
			log::info!("Created category {} with ID: {}", category.name, category.id);
			Ok(category)
		})
	}

	pub fn list_categories(conn: &mut SqliteConnection) -> Result<Vec<Category>, ApiError> {
		Ok(categories::table.order(categories::id.asc()).select(Category::as_select()).load(conn)?)
	}
}

pub struct LedgerRepo;

impl LedgerRepo {
	pub fn create_transaction(
		conn: &mut SqliteConnection,
		new: &ValidTransaction,
	) -> Result<TransactionView, ApiError> {
		conn.immediate_transaction(|conn| {
			let category_name = categories::table
				.find(new.category_id)
				.select(categories::name)
				.first::<String>(conn)
				.optional()?
				.ok_or_else(|| {
					ApiError::Reference(format!("Category {} does not exist", new.category_id))
				})?;

			let transaction = diesel::insert_into(transactions::table)
				.values(&NewTransaction {
					title: &new.title,
					kind: new.kind.as_str(),
					amount_cents: new.amount_cents,
					category_id: new.category_id,
					created_at: chrono::Utc::now().naive_utc(),
				})
				.returning(Transaction::as_returning())
				.get_result(conn)?;
			log::info!(
				"Transaction {} created in category {}",
				transaction.id,
				transaction.category_id
			);
			TransactionView::new(transaction, category_name)
		})
	}

	/// Ordered by creation time; `id` breaks ties so `Desc` is exactly the
	/// reverse of `Asc`.
	pub fn list_transactions(
		conn: &mut SqliteConnection,
		order: SortOrder,
	) -> Result<Vec<TransactionView>, ApiError> {
		let query = transactions::table
			.inner_join(categories::table)
			.select((Transaction::as_select(), categories::name));
		let rows: Vec<(Transaction, String)> = match order {
			SortOrder::Asc =>
				query.order((transactions::created_at.asc(), transactions::id.asc())).load(conn)?,
			SortOrder::Desc =>
				query.order((transactions::created_at.desc(), transactions::id.desc())).load(conn)?,
		};
		rows.into_iter().map(|(transaction, category)| TransactionView::new(transaction, category)).collect()
	}

	pub fn delete_transaction(conn: &mut SqliteConnection, id: i32) -> Result<(), ApiError> {
		let deleted = diesel::delete(transactions::table.find(id)).execute(conn)?;
		if deleted == 0 {
			return Err(ApiError::NotFound("Transaction"));
		}
		log::info!("Transaction {} deleted", id);
		Ok(())
	}

	pub fn list_categories_with_totals(
		conn: &mut SqliteConnection,
	) -> Result<Vec<CategoryTotal>, ApiError> {
		let categories = CategoryRepo::list_categories(conn)?;
		let transactions = transactions::table.select(Transaction::as_select()).load(conn)?;
		category_totals(&categories, &transactions)
	}
}

/// Signed sum per category: deposits add, withdrawals subtract. Every
/// category appears, with zero when it has no transactions. The sum is kept
/// as a decimal, so totals past the `i64` cent range still list.
pub fn category_totals(
	categories: &[Category],
	transactions: &[Transaction],
) -> Result<Vec<CategoryTotal>, ApiError> {
	categories
		.iter()
		.map(|category| {
			let mut total = BigDecimal::zero();
			for transaction in transactions.iter().filter(|t| t.category_id == category.id) {
				total += BigDecimal::from(transaction.kind()?.signed(transaction.amount_cents));
			}
			Ok(CategoryTotal {
				id: category.id,
				name: category.name.clone(),
				total_amount: cents_to_amount(total),
			})
		})
		.collect()
}

pub struct ClinicalRepo;

impl ClinicalRepo {
	pub fn create_transaction(
		conn: &mut SqliteConnection,
		input: ClinicalInput,
		heart_disease: i32,
	) -> Result<ClinicalTransaction, ApiError> {
		let record = diesel::insert_into(clinical_transactions::table)
			.values(&NewClinicalTransaction::new(input, heart_disease, chrono::Utc::now().naive_utc()))
			.returning(ClinicalTransaction::as_returning())
			.get_result(conn)?;
		log::info!("Clinical transaction {} stored with heart_disease={}", record.id, heart_disease);
		Ok(record)
	}

	pub fn list_transactions(
		conn: &mut SqliteConnection,
		order: SortOrder,
	) -> Result<Vec<ClinicalTransaction>, ApiError> {
		let query = clinical_transactions::table.select(ClinicalTransaction::as_select());
		Ok(match order {
			SortOrder::Asc => query
				.order((clinical_transactions::created_at.asc(), clinical_transactions::id.asc()))
				.load(conn)?,
			SortOrder::Desc => query
				.order((clinical_transactions::created_at.desc(), clinical_transactions::id.desc()))
				.load(conn)?,
		})
	}

	pub fn delete_transaction(conn: &mut SqliteConnection, id: i32) -> Result<(), ApiError> {
		let deleted = diesel::delete(clinical_transactions::table.find(id)).execute(conn)?;
		if deleted == 0 {
			return Err(ApiError::NotFound("Transaction"));
		}
		log::info!("Clinical transaction {} deleted", id);
		Ok(())
	}
}
