//! Running account balances replayed from ledger history.

use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::try_join_all;
use mizan_shared::types::{AccountId, CompanyId};
use rust_decimal::Decimal;

use super::flows::{Flow, FlowRecords, FlowSource, Posting};
use super::types::{AccountMovement, AccountStatement, StatementLine};
use crate::ledger::{
    AccountKind, DateWindow, InternalTransfer, InvoiceRecord, MonetaryAccount, Side, Voucher,
    day_before,
};
use crate::store::{LedgerStore, StoreError};

/// Records of one flow source.
enum Fetched {
    Invoices(Vec<InvoiceRecord>),
    Vouchers(Vec<Voucher>),
    Transfers(Vec<InternalTransfer>),
}

impl Fetched {
    fn records(&self) -> FlowRecords<'_> {
        match self {
            Self::Invoices(invoices) => FlowRecords {
                invoices,
                ..FlowRecords::default()
            },
            Self::Vouchers(vouchers) => FlowRecords {
                vouchers,
                ..FlowRecords::default()
            },
            Self::Transfers(transfers) => FlowRecords {
                transfers,
                ..FlowRecords::default()
            },
        }
    }
}

/// Computes opening, period and closing balances of monetary accounts.
pub struct AccountBalanceCalculator<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> AccountBalanceCalculator<'a, S> {
    /// Creates a calculator reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Movements of every account of `kind` over `[start, end]`.
    ///
    /// Records are fetched once per source and folded into all accounts in a
    /// single pass.
    ///
    /// # Errors
    ///
    /// Returns the store error if any read fails.
    pub async fn compute_kind(
        &self,
        company: CompanyId,
        kind: AccountKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AccountMovement>, StoreError> {
        let (accounts, postings) = futures::try_join!(
            self.store.accounts(company, kind),
            self.postings(company, kind, end),
        )?;

        let mut by_account: HashMap<AccountId, AccountMovement> = accounts
            .iter()
            .map(|account| (account.id, AccountMovement::idle(account)))
            .collect();
        let mut opening_net: HashMap<AccountId, Decimal> = HashMap::new();
        let opening = DateWindow::through(day_before(start));
        let period = DateWindow::period(start, end);

        for posting in &postings {
            let Some(movement) = by_account.get_mut(&posting.account_id) else {
                continue;
            };
            if period.contains(posting.date) {
                match posting.side {
                    Side::Debit => movement.period_debit += posting.amount,
                    Side::Credit => movement.period_credit += posting.amount,
                }
            } else if opening.contains(posting.date) {
                *opening_net.entry(posting.account_id).or_default() += signed(posting);
            }
        }

        let movements = accounts
            .iter()
            .filter_map(|account| by_account.remove(&account.id))
            .map(|mut movement| {
                let natural = movement.kind.normal_side();
                let before = opening_net
                    .get(&movement.account_id)
                    .copied()
                    .unwrap_or_default();
                movement.opening += natural.from_debit_positive(before);
                movement.closing = movement.opening
                    + natural.from_debit_positive(movement.period_debit - movement.period_credit);
                movement
            })
            .collect();

        tracing::debug!(
            %company,
            %kind,
            %start,
            %end,
            postings = postings.len(),
            "balances computed"
        );
        Ok(movements)
    }

    /// Movement of a single account over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns the store error if any read fails.
    pub async fn compute(
        &self,
        account: &MonetaryAccount,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccountMovement, StoreError> {
        Ok(self.statement(account, start, end).await?.movement)
    }

    /// Dated period postings of a single account with a running balance.
    ///
    /// # Errors
    ///
    /// Returns the store error if any read fails.
    pub async fn statement(
        &self,
        account: &MonetaryAccount,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccountStatement, StoreError> {
        let postings = self.postings(account.company_id, account.kind, end).await?;
        let opening = DateWindow::through(day_before(start));
        let period = DateWindow::period(start, end);
        let natural = account.kind.normal_side();

        let mut movement = AccountMovement::idle(account);
        let opening_net: Decimal = postings
            .iter()
            .filter(|p| p.account_id == account.id && opening.contains(p.date))
            .map(signed)
            .sum();
        movement.opening += natural.from_debit_positive(opening_net);

        let mut balance = movement.opening;
        let mut lines = Vec::new();
        for posting in postings
            .iter()
            .filter(|p| p.account_id == account.id && period.contains(p.date))
        {
            balance += natural.from_debit_positive(signed(posting));
            let (debit, credit) = match posting.side {
                Side::Debit => (posting.amount, Decimal::ZERO),
                Side::Credit => (Decimal::ZERO, posting.amount),
            };
            movement.period_debit += debit;
            movement.period_credit += credit;
            lines.push(StatementLine {
                record_id: posting.record_id,
                date: posting.date,
                flow: posting.flow,
                debit,
                credit,
                balance,
            });
        }
        movement.closing = balance;

        Ok(AccountStatement { movement, lines })
    }

    /// Every posting onto accounts of `kind` dated on or before `end`, by date.
    async fn postings(
        &self,
        company: CompanyId,
        kind: AccountKind,
        end: NaiveDate,
    ) -> Result<Vec<Posting>, StoreError> {
        let window = DateWindow::through(end);
        let table = Flow::table(kind);

        let mut sources: Vec<FlowSource> = Vec::new();
        for (flow, _) in &table {
            if !sources.contains(&flow.source()) {
                sources.push(flow.source());
            }
        }

        let fetched = try_join_all(
            sources
                .iter()
                .map(|source| self.fetch(company, *source, window)),
        )
        .await?;

        let mut postings = Vec::new();
        for (flow, _) in table {
            if let Some(idx) = sources.iter().position(|source| *source == flow.source()) {
                flow.postings(kind, &fetched[idx].records(), &mut postings);
            }
        }
        postings.sort_by_key(|posting| posting.date);
        Ok(postings)
    }

    async fn fetch(
        &self,
        company: CompanyId,
        source: FlowSource,
        window: DateWindow,
    ) -> Result<Fetched, StoreError> {
        Ok(match source {
            FlowSource::Invoice(kind) => {
                Fetched::Invoices(self.store.invoices(company, kind, window).await?)
            }
            FlowSource::Voucher(kind) => {
                Fetched::Vouchers(self.store.vouchers(company, kind, window).await?)
            }
            FlowSource::Transfer => {
                Fetched::Transfers(self.store.transfers(company, window).await?)
            }
        })
    }
}

/// Posting amount with debits positive.
fn signed(posting: &Posting) -> Decimal {
    match posting.side {
        Side::Debit => posting.amount,
        Side::Credit => -posting.amount,
    }
}
