pub use sea_orm_migration::prelude::*;

mod m20261001_000001_baseline_schema;
mod m20261008_000002_add_campaigns;
mod m20261015_000003_add_gang_lineages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_baseline_schema::Migration),
            Box::new(m20261008_000002_add_campaigns::Migration),
            Box::new(m20261015_000003_add_gang_lineages::Migration),
        ]
    }
}
