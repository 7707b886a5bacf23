//! Ledger schema migration.
//!
//! Creates the tables the reporting engine reads. Transactional modules own
//! the rows; the engine never writes to these tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: COMPANIES & ACCOUNTS
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(MONETARY_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: DOCUMENTS
        // ============================================================
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(VOUCHERS_SQL).await?;
        db.execute_unprepared(INTERNAL_TRANSFERS_SQL).await?;

        // ============================================================
        // PART 4: INVENTORY
        // ============================================================
        db.execute_unprepared(ITEMS_SQL).await?;
        db.execute_unprepared(STORE_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 5: EXPENSE CLASSIFICATION
        // ============================================================
        db.execute_unprepared(EXPENSES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE account_kind AS ENUM (
    'safe',
    'bank',
    'customer',
    'supplier',
    'receivable_account',
    'payable_account',
    'current_account'
);

CREATE TYPE invoice_kind AS ENUM (
    'sales_invoice',
    'purchase_invoice',
    'sales_return',
    'purchase_return'
);

CREATE TYPE voucher_kind AS ENUM ('receipt', 'payment');

CREATE TYPE store_movement_kind AS ENUM ('receipt', 'issue', 'transfer');
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name            VARCHAR(255) NOT NULL,
    currency        VARCHAR(3) NOT NULL DEFAULT 'SAR',
    capital         NUMERIC(18, 4) NOT NULL DEFAULT 0,
    vat_enabled     BOOLEAN NOT NULL DEFAULT FALSE,
    vat_rate        NUMERIC(5, 2) NOT NULL DEFAULT 15,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const MONETARY_ACCOUNTS_SQL: &str = r"
-- Opening balances are stored on the account kind's normal side.
CREATE TABLE monetary_accounts (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    kind            account_kind NOT NULL,
    code            VARCHAR(50) NOT NULL,
    name            VARCHAR(255) NOT NULL,
    opening_balance NUMERIC(18, 4) NOT NULL DEFAULT 0,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (company_id, kind, code)
);

CREATE INDEX idx_monetary_accounts_company_kind ON monetary_accounts(company_id, kind);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id                  UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id          UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    kind                invoice_kind NOT NULL,
    posted_at           TIMESTAMPTZ NOT NULL,
    party_id            UUID REFERENCES monetary_accounts(id),
    payment_method      VARCHAR(20) NOT NULL DEFAULT 'cash',
    payment_target_type VARCHAR(20),
    payment_target_id   UUID REFERENCES monetary_accounts(id),
    is_split            BOOLEAN NOT NULL DEFAULT FALSE,
    split_safe_id       UUID REFERENCES monetary_accounts(id),
    split_cash_amount   NUMERIC(18, 4),
    split_bank_id       UUID REFERENCES monetary_accounts(id),
    split_bank_amount   NUMERIC(18, 4),
    subtotal            NUMERIC(18, 4) NOT NULL DEFAULT 0,
    discount            NUMERIC(18, 4) NOT NULL DEFAULT 0,
    tax                 NUMERIC(18, 4) NOT NULL DEFAULT 0,
    net                 NUMERIC(18, 4) NOT NULL DEFAULT 0,
    lines               JSONB NOT NULL DEFAULT '[]',
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_invoices_company_kind_date ON invoices(company_id, kind, posted_at);
";

const VOUCHERS_SQL: &str = r"
-- entity_type/entity_id reference the counterparty polymorphically.
-- Expense vouchers name their expense code in expense_code_id.
CREATE TABLE vouchers (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    kind            voucher_kind NOT NULL,
    posted_at       TIMESTAMPTZ NOT NULL,
    entity_type     VARCHAR(50),
    entity_id       UUID,
    expense_code_id UUID,
    channel_type    VARCHAR(20),
    channel_id      UUID REFERENCES monetary_accounts(id),
    amount          NUMERIC(18, 4) NOT NULL CHECK (amount >= 0),
    tax             NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (tax >= 0 AND tax <= amount),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_vouchers_company_kind_date ON vouchers(company_id, kind, posted_at);
";

const INTERNAL_TRANSFERS_SQL: &str = r"
CREATE TABLE internal_transfers (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    posted_at       TIMESTAMPTZ NOT NULL,
    from_type       VARCHAR(20),
    from_id         UUID REFERENCES monetary_accounts(id),
    to_type         VARCHAR(20),
    to_id           UUID REFERENCES monetary_accounts(id),
    amount          NUMERIC(18, 4) NOT NULL CHECK (amount >= 0),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_internal_transfers_company_date ON internal_transfers(company_id, posted_at);
";

const ITEMS_SQL: &str = r"
CREATE TABLE items (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    code            VARCHAR(50) NOT NULL,
    name            VARCHAR(255) NOT NULL,
    item_type       VARCHAR(20) NOT NULL DEFAULT 'STOCKED',
    purchase_price  NUMERIC(18, 4),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (company_id, code)
);

CREATE TABLE store_items (
    id               UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    item_id          UUID NOT NULL REFERENCES items(id) ON DELETE CASCADE,
    store_id         UUID NOT NULL,
    opening_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0,
    UNIQUE (item_id, store_id)
);
";

const STORE_MOVEMENTS_SQL: &str = r"
CREATE TABLE store_movements (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    kind            store_movement_kind NOT NULL,
    posted_at       TIMESTAMPTZ NOT NULL,
    from_store_id   UUID,
    to_store_id     UUID,
    lines           JSONB NOT NULL DEFAULT '[]',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_store_movements_company_kind_date ON store_movements(company_id, kind, posted_at);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expense_types (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    name            VARCHAR(255) NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE expense_codes (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id      UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    expense_type_id UUID REFERENCES expense_types(id) ON DELETE SET NULL,
    code            VARCHAR(50) NOT NULL,
    name            VARCHAR(255) NOT NULL,
    UNIQUE (company_id, code)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS expense_codes CASCADE;
DROP TABLE IF EXISTS expense_types CASCADE;
DROP TABLE IF EXISTS store_movements CASCADE;
DROP TABLE IF EXISTS store_items CASCADE;
DROP TABLE IF EXISTS items CASCADE;
DROP TABLE IF EXISTS internal_transfers CASCADE;
DROP TABLE IF EXISTS vouchers CASCADE;
DROP TABLE IF EXISTS invoices CASCADE;
DROP TABLE IF EXISTS monetary_accounts CASCADE;
DROP TABLE IF EXISTS companies CASCADE;

DROP TYPE IF EXISTS store_movement_kind;
DROP TYPE IF EXISTS voucher_kind;
DROP TYPE IF EXISTS invoice_kind;
DROP TYPE IF EXISTS account_kind;
";
