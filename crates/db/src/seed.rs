//! Sample listings inserted into an empty database on startup.

use nawy_core::apartment::ApartmentStatus;
use nawy_core::apartment_input::NewApartment;
use sqlx::PgPool;

use crate::repositories::ApartmentRepo;

/// Five demo units across three cities.
pub fn sample_apartments() -> Vec<NewApartment> {
    let unit = |project: &str,
                unit_name: &str,
                unit_number: &str,
                price: f64,
                area: f64,
                city: &str,
                description: &str,
                status: ApartmentStatus| NewApartment {
        project: project.to_string(),
        unit_name: unit_name.to_string(),
        unit_number: unit_number.to_string(),
        price,
        area,
        city: city.to_string(),
        description: Some(description.to_string()),
        status,
    };

    vec![
        unit(
            "Palm Hills",
            "A-101",
            "101",
            1_500_000.0,
            120.0,
            "Cairo",
            "Luxurious apartment with garden view in a prime location",
            ApartmentStatus::Available,
        ),
        unit(
            "Madinaty",
            "B-205",
            "205",
            2_200_000.0,
            150.0,
            "Cairo",
            "Spacious apartment with modern finishes and balcony",
            ApartmentStatus::Available,
        ),
        unit(
            "Zayed Dunes",
            "C-302",
            "302",
            1_800_000.0,
            135.0,
            "Giza",
            "Contemporary design with smart home features",
            ApartmentStatus::Sold,
        ),
        unit(
            "North Edge Towers",
            "D-410",
            "410",
            3_000_000.0,
            180.0,
            "Alexandria",
            "Premium penthouse with sea view and private terrace",
            ApartmentStatus::Reserved,
        ),
        unit(
            "Palm Hills",
            "E-102",
            "102",
            1_350_000.0,
            110.0,
            "Cairo",
            "Cozy apartment perfect for small families",
            ApartmentStatus::Available,
        ),
    ]
}

/// Insert [`sample_apartments`] if the table is empty.
///
/// All rows go in one transaction. Units that already exist (another
/// instance seeding concurrently) are skipped. Returns the number of rows
/// inserted.
pub async fn seed_sample_apartments(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let existing = ApartmentRepo::count(pool).await?;
    if existing > 0 {
        tracing::info!(existing, "Apartments already present, skipping seed");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for apartment in sample_apartments() {
        let result = sqlx::query(
            "INSERT INTO apartments \
                (project, unit_name, unit_number, price, area, city, description, status) \
             VALUES ($1, $2, $3, $4::numeric, $5::numeric, $6, $7, $8) \
             ON CONFLICT ON CONSTRAINT uq_apartments_project_unit_number DO NOTHING",
        )
        .bind(&apartment.project)
        .bind(&apartment.unit_name)
        .bind(&apartment.unit_number)
        .bind(apartment.price)
        .bind(apartment.area)
        .bind(&apartment.city)
        .bind(apartment.description.as_deref())
        .bind(apartment.status.as_str())
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;

    tracing::info!(inserted, "Seeded sample apartments");
    Ok(inserted)
}
