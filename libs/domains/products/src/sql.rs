use async_trait::async_trait;
use axum_helpers::{FieldError, Paginated, PaginationMeta};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait,
};
use tracing::info;

use crate::{
    entity,
    error::{map_write_error, ProductError, ProductResult},
    models::{timestamp_now, NewProduct, Product, ProductChanges, ProductId},
    query::{ProductQuery, SortField, SortOrder},
    repository::ProductRepository,
};

/// Relational store over the `products` table (SQLite or Postgres).
///
/// Every mutation runs in its own transaction. The sku pre-check inside the
/// transaction and the unique index both surface as `DuplicateSku`.
#[derive(Debug, Clone)]
pub struct SqlProductRepository {
    db: DatabaseConnection,
}

impl SqlProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Integer ids only; anything else cannot name a row.
fn row_key(id: ProductId) -> Option<i32> {
    id.as_serial().and_then(|v| i32::try_from(v).ok())
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Name => entity::Column::Name,
        SortField::Price => entity::Column::Price,
        SortField::CreatedAt => entity::Column::CreatedAt,
        SortField::UpdatedAt => entity::Column::UpdatedAt,
    }
}

/// Escape LIKE wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring match of `term` against `column`.
///
/// Postgres `lower()` folds every letter. SQLite's built-in `lower()` folds
/// ASCII only, so on SQLite non-ASCII letters match only in the case the term
/// was written in (`Éclair` finds "Éclair", `éclair` does not). The exact-case
/// branch keeps that match working.
fn contains_ignore_case(column: entity::Column, term: &str) -> Condition {
    let folded = like_pattern(&term.to_lowercase());
    let exact = like_pattern(term);
    Condition::any()
        .add(Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(folded).escape('\\')))
        .add(Expr::col(column).like(LikeExpr::new(exact).escape('\\')))
}

fn filtered(query: &ProductQuery) -> Select<entity::Entity> {
    let mut select = entity::Entity::find();

    if let Some(term) = &query.search {
        select = select.filter(
            Condition::any()
                .add(contains_ignore_case(entity::Column::Name, term))
                .add(contains_ignore_case(entity::Column::Description, term))
                .add(contains_ignore_case(entity::Column::Sku, term)),
        );
    }

    if let Some(category) = &query.category {
        // same folding caveat as `contains_ignore_case`
        select = select.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(entity::Column::Category)))
                        .eq(category.to_lowercase()),
                )
                .add(entity::Column::Category.eq(category.as_str())),
        );
    }

    if let Some(min) = query.min_price {
        select = select.filter(entity::Column::Price.gte(min));
    }
    if let Some(max) = query.max_price {
        select = select.filter(entity::Column::Price.lte(max));
    }

    let order = match query.order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };
    select
        .order_by(sort_column(query.sort_by), order)
        .order_by_asc(entity::Column::Id)
}

async fn sku_exists<C: ConnectionTrait>(
    conn: &C,
    sku: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut select = entity::Entity::find().filter(entity::Column::Sku.eq(sku));
    if let Some(id) = except {
        select = select.filter(entity::Column::Id.ne(id));
    }
    Ok(select.count(conn).await? > 0)
}

fn missing(field: &str) -> ProductError {
    ProductError::Validation(vec![FieldError::new(field, format!("{} is required", field))])
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let category = input.category.ok_or_else(|| missing("category"))?;
        let sku = input.sku.ok_or_else(|| missing("sku"))?;

        let txn = self.db.begin().await?;

        if sku_exists(&txn, &sku, None).await? {
            return Err(ProductError::DuplicateSku(sku));
        }

        let now = timestamp_now();
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            category: Set(category),
            stock_quantity: Set(input.stock_quantity),
            sku: Set(sku.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&txn)
            .await
            .map_err(|e| map_write_error(e, Some(&sku)))?;
        txn.commit().await?;

        info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let Some(key) = row_key(id) else {
            return Ok(None);
        };
        let model = entity::Entity::find_by_id(key).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, query: &ProductQuery) -> ProductResult<Paginated<Product>> {
        let paginator = filtered(query).paginate(&self.db, query.per_page);
        let total = paginator.num_items().await?;
        let pagination = PaginationMeta::new(query.page, query.per_page, total);

        // Pages past the end never reach the database, where the offset could overflow.
        if query.offset() >= total {
            return Ok(Paginated {
                items: Vec::new(),
                pagination,
            });
        }

        let models = paginator.fetch_page(query.page - 1).await?;

        Ok(Paginated {
            items: models.into_iter().map(Into::into).collect(),
            pagination,
        })
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> ProductResult<Product> {
        let key = row_key(id).ok_or(ProductError::NotFound(id))?;
        let txn = self.db.begin().await?;

        let model = entity::Entity::find_by_id(key)
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if let Some(sku) = changes.sku.as_deref() {
            if sku_exists(&txn, sku, Some(key)).await? {
                return Err(ProductError::DuplicateSku(sku.to_string()));
            }
        }

        let mut product: Product = model.clone().into();
        product.apply_changes(changes);

        let mut active_model: entity::ActiveModel = model.into();
        active_model.name = Set(product.name);
        active_model.description = Set(product.description);
        active_model.price = Set(product.price);
        active_model.category = Set(product.category.unwrap_or_default());
        active_model.stock_quantity = Set(product.stock_quantity);
        active_model.sku = Set(product.sku.clone().unwrap_or_default());
        active_model.updated_at = Set(product.updated_at.into());

        let updated = active_model
            .update(&txn)
            .await
            .map_err(|e| map_write_error(e, product.sku.as_deref()))?;
        txn.commit().await?;

        info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: ProductId) -> ProductResult<Product> {
        let key = row_key(id).ok_or(ProductError::NotFound(id))?;
        let txn = self.db.begin().await?;

        let model = entity::Entity::find_by_id(key)
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        entity::Entity::delete_by_id(key).exec(&txn).await?;
        txn.commit().await?;

        info!(product_id = %id, "Deleted product");
        Ok(model.into())
    }

    async fn categories(&self) -> ProductResult<Vec<String>> {
        let categories: Vec<String> = entity::Entity::find()
            .select_only()
            .column(entity::Column::Category)
            .distinct()
            .order_by_asc(entity::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(categories.into_iter().filter(|c| !c.is_empty()).collect())
    }

    async fn exists_by_sku(&self, sku: &str) -> ProductResult<bool> {
        Ok(sku_exists(&self.db, sku, None).await?)
    }
}
