use sqlx::sqlite::SqlitePool;

use crate::{
    db::{propertydb::PropertyExt, DBClient},
    models::propertymodel::{PropertyRecord, STATUS_AVAILABLE},
};

/// Creates the `properties` table when it does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            property_id TEXT PRIMARY KEY,
            location TEXT,
            bhk INTEGER,
            price_lacs REAL,
            amenities TEXT,
            status TEXT,
            contact_person TEXT,
            contact_number TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Upserts a small fixed set of listings so a fresh database has something
/// to search. Insert errors are logged per row and skipped.
pub async fn seed_demo_data(db: &DBClient) {
    let mut loaded = 0usize;
    for record in demo_properties() {
        match db.insert_property(&record).await {
            Ok(()) => loaded += 1,
            Err(err) => {
                tracing::warn!(property_id = %record.property_id, error = %err,
                    "skipping demo row");
            }
        }
    }
    tracing::info!(rows = loaded, "demo property data loaded");
}

fn demo_properties() -> Vec<PropertyRecord> {
    fn listing(
        property_id: &str,
        location: &str,
        bhk: i64,
        price_lacs: f64,
        amenities: &str,
        status: &str,
        contact_person: &str,
        contact_number: &str,
    ) -> PropertyRecord {
        PropertyRecord {
            property_id: property_id.to_string(),
            location: location.to_string(),
            bhk,
            price_lacs,
            amenities: amenities.to_string(),
            status: status.to_string(),
            contact_person: contact_person.to_string(),
            contact_number: contact_number.to_string(),
        }
    }

    vec![
        listing(
            "P001",
            "Koramangala",
            3,
            145.0,
            "Gym, Swimming Pool, Covered Parking, Power Backup",
            STATUS_AVAILABLE,
            "Ravi Kumar",
            "+91-9876543210",
        ),
        listing(
            "P002",
            "Whitefield",
            2,
            78.0,
            "Clubhouse, Children's Play Area, Lift",
            STATUS_AVAILABLE,
            "Meena Iyer",
            "+91-9812345670",
        ),
        listing(
            "P003",
            "Indiranagar",
            4,
            420.0,
            "Private Garden, Villa Community, Gated Security",
            STATUS_AVAILABLE,
            "Arjun Shetty",
            "+91-9900112233",
        ),
        listing(
            "P004",
            "HSR Layout",
            2,
            92.0,
            "Gym, Lift, Rainwater Harvesting",
            STATUS_AVAILABLE,
            "Fatima Begum",
            "+91-9845012345",
        ),
        listing(
            "P005",
            "Jayanagar",
            3,
            160.0,
            "Park Facing, Covered Parking, Power Backup",
            STATUS_AVAILABLE,
            "Suresh Rao",
            "+91-9833221100",
        ),
        listing(
            "P006",
            "Whitefield",
            5,
            510.0,
            "Luxury Villa, Private Pool, Home Theatre",
            STATUS_AVAILABLE,
            "Deepa Nair",
            "+91-9765432109",
        ),
        listing(
            "P007",
            "Electronic City",
            1,
            38.0,
            "Lift, Security, Borewell",
            STATUS_AVAILABLE,
            "Manoj Pillai",
            "+91-9723456789",
        ),
        listing(
            "P008",
            "Koramangala",
            3,
            150.0,
            "Gym, Clubhouse, Covered Parking",
            "Sold",
            "Ravi Kumar",
            "+91-9876543210",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = test_pool().await;
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_upsert_is_stable_across_runs() {
        let pool = test_pool().await;
        ensure_schema(&pool).await.unwrap();
        let db = DBClient::new(pool);

        seed_demo_data(&db).await;
        seed_demo_data(&db).await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count as usize, demo_properties().len());
    }
}
