//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: account holders with a balance and notification preferences
//! - `funds`: the investable fund catalog (reference data)
//! - `subscriptions`: active user-fund links, unique per (user_id, fund_id)
//! - `transactions`: append-only audit log of subscriptions/cancellations

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Phone,
    BalanceMinor,
    Preferences,
}

#[derive(Iden)]
enum Funds {
    Table,
    Id,
    Name,
    MinimumSubscriptionMinor,
    Category,
}

#[derive(Iden)]
enum Subscriptions {
    Table,
    Id,
    UserId,
    FundId,
    AmountMinor,
    SubscribedAt,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    FundId,
    AmountMinor,
    Kind,
    SubscriptionId,
    OccurredAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().not_null())
                    .col(ColumnDef::new(Users::BalanceMinor).big_integer().not_null())
                    .col(ColumnDef::new(Users::Preferences).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Funds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Funds::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Funds::Name).string().not_null())
                    .col(
                        ColumnDef::new(Funds::MinimumSubscriptionMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Funds::Category).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::UserId).string().not_null())
                    .col(ColumnDef::new(Subscriptions::FundId).string().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::SubscribedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subscriptions-user_id")
                            .from(Subscriptions::Table, Subscriptions::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subscriptions-fund_id")
                            .from(Subscriptions::Table, Subscriptions::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One active subscription per (user, fund); closes the race between
        // the duplicate check and the insert.
        manager
            .create_index(
                Index::create()
                    .name("idx-subscriptions-user_id-fund_id")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::FundId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::FundId).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::SubscriptionId).string())
                    .col(
                        ColumnDef::new(Transactions::OccurredAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-fund_id")
                            .from(Transactions::Table, Transactions::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Funds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
