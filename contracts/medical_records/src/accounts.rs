//! Account kinds and their discriminator-tagged byte encoding.

use mr_common::{discriminator, Reader, Writer, DISCRIMINATOR_LEN};
use soroban_sdk::{Bytes, Env};

use crate::errors::ContractError;
use crate::history::{HistoryLedger, HistoryPage};
use crate::patient::PatientRecord;
use crate::registry::AdminRegistry;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountKind {
    Admin,
    History,
    HistoryPage,
    Patient,
}

impl AccountKind {
    const ALL: [AccountKind; 4] = [
        AccountKind::Admin,
        AccountKind::History,
        AccountKind::HistoryPage,
        AccountKind::Patient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AccountKind::Admin => "AdminRegistry",
            AccountKind::History => "AuthorityHistory",
            AccountKind::HistoryPage => "AuthorityHistoryPage",
            AccountKind::Patient => "PatientRecord",
        }
    }

    pub fn discriminator(self, env: &Env) -> [u8; DISCRIMINATOR_LEN] {
        discriminator(env, self.name())
    }

    fn from_discriminator(env: &Env, tag: &[u8; DISCRIMINATOR_LEN]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.discriminator(env) == *tag)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Account {
    Admin(AdminRegistry),
    History(HistoryLedger),
    HistoryPage(HistoryPage),
    Patient(PatientRecord),
}

impl Account {
    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Admin(_) => AccountKind::Admin,
            Account::History(_) => AccountKind::History,
            Account::HistoryPage(_) => AccountKind::HistoryPage,
            Account::Patient(_) => AccountKind::Patient,
        }
    }

    pub fn encode(&self, env: &Env) -> Result<Bytes, ContractError> {
        let mut w = Writer::new(env);
        w.put_discriminator(&self.kind().discriminator(env));
        match self {
            Account::Admin(registry) => registry.write_fields(&mut w)?,
            Account::History(ledger) => ledger.write_fields(&mut w)?,
            Account::HistoryPage(page) => page.write_fields(&mut w)?,
            Account::Patient(record) => record.write_fields(&mut w)?,
        }
        Ok(w.finish())
    }

    pub fn decode(env: &Env, data: &Bytes) -> Result<Self, ContractError> {
        let mut r = Reader::new(env, data);
        let tag = r.read_discriminator()?;
        let account = match AccountKind::from_discriminator(env, &tag) {
            Some(AccountKind::Admin) => Account::Admin(AdminRegistry::read_fields(&mut r)?),
            Some(AccountKind::History) => Account::History(HistoryLedger::read_fields(&mut r)?),
            Some(AccountKind::HistoryPage) => {
                Account::HistoryPage(HistoryPage::read_fields(env, &mut r)?)
            }
            Some(AccountKind::Patient) => Account::Patient(PatientRecord::read_fields(&mut r)?),
            None => return Err(ContractError::MalformedAccount),
        };
        r.finish()?;
        Ok(account)
    }

    pub fn into_admin(self) -> Result<AdminRegistry, ContractError> {
        match self {
            Account::Admin(registry) => Ok(registry),
            _ => Err(ContractError::MalformedAccount),
        }
    }

    pub fn into_history(self) -> Result<HistoryLedger, ContractError> {
        match self {
            Account::History(ledger) => Ok(ledger),
            _ => Err(ContractError::MalformedAccount),
        }
    }

    pub fn into_history_page(self) -> Result<HistoryPage, ContractError> {
        match self {
            Account::HistoryPage(page) => Ok(page),
            _ => Err(ContractError::MalformedAccount),
        }
    }

    pub fn into_patient(self) -> Result<PatientRecord, ContractError> {
        match self {
            Account::Patient(record) => Ok(record),
            _ => Err(ContractError::MalformedAccount),
        }
    }
}
