//! Repository for the `apartments` table.

use nawy_core::apartment_input::NewApartment;
use nawy_core::listing::{ListingQuerySpec, SortMode};
use nawy_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::models::apartment::Apartment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project, unit_name, unit_number, \
     price::float8 AS price, area::float8 AS area, \
     city, description, status, created_at, updated_at";

/// Unique constraint guarding the (project, unit_number) pair.
pub const UQ_PROJECT_UNIT_NUMBER: &str = "uq_apartments_project_unit_number";

/// Provides insert, lookup and filtered listing for apartments.
pub struct ApartmentRepo;

impl ApartmentRepo {
    /// Insert a validated apartment, returning the created row.
    ///
    /// A duplicate (project, unit_number) surfaces as a unique violation on
    /// [`UQ_PROJECT_UNIT_NUMBER`]; nothing is written in that case.
    pub async fn create(pool: &PgPool, input: &NewApartment) -> Result<Apartment, sqlx::Error> {
        let query = format!(
            "INSERT INTO apartments \
                (project, unit_name, unit_number, price, area, city, description, status) \
             VALUES ($1, $2, $3, $4::numeric, $5::numeric, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Apartment>(&query)
            .bind(&input.project)
            .bind(&input.unit_name)
            .bind(&input.unit_number)
            .bind(input.price)
            .bind(input.area)
            .bind(&input.city)
            .bind(input.description.as_deref())
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an apartment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Apartment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM apartments WHERE id = $1");
        sqlx::query_as::<_, Apartment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of stored apartments, unfiltered.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM apartments")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Run a listing query: filter, order, then slice one page.
    ///
    /// Returns the page rows together with the number of rows matching the
    /// filter. A page past the end yields no rows but still the full count.
    pub async fn list_page(
        pool: &PgPool,
        spec: &ListingQuerySpec,
    ) -> Result<(Vec<Apartment>, i64), sqlx::Error> {
        let filter = ListingFilter::from_spec(spec);

        let count_query = format!("SELECT COUNT(*) FROM apartments {}", filter.where_clause);
        let (total,): (i64,) = filter
            .bind(sqlx::query_as::<_, (i64,)>(&count_query))
            .fetch_one(pool)
            .await?;

        let page_query = format!(
            "SELECT {COLUMNS} FROM apartments {where_clause} \
             ORDER BY {order_by} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            where_clause = filter.where_clause,
            order_by = order_by(spec.sort),
            limit_idx = filter.next_idx,
            offset_idx = filter.next_idx + 1,
        );
        let rows = filter
            .bind(sqlx::query_as::<_, Apartment>(&page_query))
            .bind(spec.limit())
            .bind(spec.offset())
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            total,
            returned = rows.len(),
            page = spec.page,
            page_size = spec.page_size,
            sort = spec.sort.as_str(),
            "Apartment listing query executed",
        );

        Ok((rows, total))
    }
}

/// `ORDER BY` clause for a sort mode. `id` breaks ties in insertion order so
/// consecutive pages never overlap.
fn order_by(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Newest => "created_at DESC, id ASC",
        SortMode::PriceAsc => "price ASC, id ASC",
        SortMode::PriceDesc => "price DESC, id ASC",
    }
}

/// Dynamic `WHERE` clause for a listing query plus the values it binds.
struct ListingFilter {
    where_clause: String,
    pattern: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    /// Next free placeholder index after the filter's own binds.
    next_idx: u32,
}

impl ListingFilter {
    fn from_spec(spec: &ListingQuerySpec) -> Self {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        let pattern = spec.search_pattern();
        if pattern.is_some() {
            conditions.push(format!(
                "(project ILIKE ${bind_idx} OR unit_name ILIKE ${bind_idx} \
                  OR unit_number ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if spec.min_price.is_some() {
            conditions.push(format!("price >= ${bind_idx}::numeric"));
            bind_idx += 1;
        }
        if spec.max_price.is_some() {
            conditions.push(format!("price <= ${bind_idx}::numeric"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Self {
            where_clause,
            pattern,
            min_price: spec.min_price,
            max_price: spec.max_price,
            next_idx: bind_idx,
        }
    }

    /// Bind filter values in the same order their placeholders were emitted.
    fn bind<'q, O>(
        &self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        if let Some(pattern) = &self.pattern {
            query = query.bind(pattern.clone());
        }
        if let Some(min_price) = self.min_price {
            query = query.bind(min_price);
        }
        if let Some(max_price) = self.max_price {
            query = query.bind(max_price);
        }
        query
    }
}
