mod errors;
mod ledger;

pub use errors::LedgerError;
pub use ledger::CustodyLedger;
