use async_trait::async_trait;

use crate::{
    db::DBClient,
    models::propertymodel::PropertyRecord,
    service::query::{PropertyQuery, QueryParam},
};

#[async_trait]
pub trait PropertyExt {
    /// Runs a built filter predicate against the `properties` relation. The
    /// pool connection is scoped to this call on every exit path.
    async fn search_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<Vec<PropertyRecord>, sqlx::Error>;

    async fn insert_property(&self, record: &PropertyRecord) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn search_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<Vec<PropertyRecord>, sqlx::Error> {
        let mut rows = sqlx::query_as::<_, PropertyRecord>(&query.sql);

        for param in &query.params {
            rows = match param {
                QueryParam::Text(value) => rows.bind(value),
                QueryParam::Int(value) => rows.bind(value),
                QueryParam::Real(value) => rows.bind(value),
            };
        }

        rows.fetch_all(self.pool()).await
    }

    async fn insert_property(&self, record: &PropertyRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO properties (
                property_id, location, bhk, price_lacs, amenities, status,
                contact_person, contact_number
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.property_id)
        .bind(&record.location)
        .bind(record.bhk)
        .bind(record.price_lacs)
        .bind(&record.amenities)
        .bind(&record.status)
        .bind(&record.contact_person)
        .bind(&record.contact_number)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
