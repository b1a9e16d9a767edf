use sea_orm_migration::prelude::*;

/// Development copy of the hosted `employees` relation. Production schemas
/// may differ; the directory reads whatever columns exist.
#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FullName,
    FirstName,
    LastName,
    Position,
    Department,
    Email,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FullName).string_len(256))
                    .col(ColumnDef::new(Employees::FirstName).string_len(128))
                    .col(ColumnDef::new(Employees::LastName).string_len(128))
                    .col(ColumnDef::new(Employees::Position).string_len(128))
                    .col(ColumnDef::new(Employees::Department).string_len(128))
                    .col(ColumnDef::new(Employees::Email).string_len(320))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}
