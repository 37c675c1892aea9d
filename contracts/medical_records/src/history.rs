//! Append-only log of authority-set mutations.
//!
//! Each admin's log has a fixed-size header at `derive(["history", admin])`
//! holding the page count and the running entry count. Entries live in pages
//! at `derive(["history", admin, n])`. Entries are only ever pushed onto the
//! last page, so reading pages in order yields the log in insertion order.
//! An append touches the header and one page, never the whole log.

use mr_common::{Reader, Writer};
use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::addresses;
use crate::errors::ContractError;
use crate::store::{self, Txn};

/// Largest accepted `history_page_capacity`.
pub const MAX_PAGE_CAPACITY: u32 = 64;
/// Most pages a single `get_history` call will decode.
pub const MAX_PAGES_PER_READ: u32 = 2;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// Identity that performed the change.
    pub admin: Address,
    /// Identity that was added or removed.
    pub authority: Address,
    pub added: bool,
    /// `true` for the read set, `false` for the write set.
    pub is_read: bool,
    pub timestamp: u64,
}

impl HistoryEntry {
    fn write_fields(&self, w: &mut Writer) -> Result<(), ContractError> {
        w.put_identity(&self.admin)?;
        w.put_identity(&self.authority)?;
        w.put_bool(self.added);
        w.put_bool(self.is_read);
        w.put_u64(self.timestamp);
        Ok(())
    }

    fn read_fields(r: &mut Reader) -> Result<Self, ContractError> {
        Ok(Self {
            admin: r.read_identity()?,
            authority: r.read_identity()?,
            added: r.read_bool()?,
            is_read: r.read_bool()?,
            timestamp: r.read_u64()?,
        })
    }
}

/// Header of an admin's history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryLedger {
    pub admin: Address,
    pub page_count: u32,
    /// Entries across all pages.
    pub total_len: u64,
}

impl HistoryLedger {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            page_count: 0,
            total_len: 0,
        }
    }

    pub(crate) fn write_fields(&self, w: &mut Writer) -> Result<(), ContractError> {
        w.put_identity(&self.admin)?;
        w.put_u32(self.page_count);
        w.put_u64(self.total_len);
        Ok(())
    }

    pub(crate) fn read_fields(r: &mut Reader) -> Result<Self, ContractError> {
        Ok(Self {
            admin: r.read_identity()?,
            page_count: r.read_u32()?,
            total_len: r.read_u64()?,
        })
    }

    fn check_identity(&self, admin: &Address) -> Result<(), ContractError> {
        if self.admin != *admin {
            return Err(ContractError::MalformedAccount);
        }
        Ok(())
    }
}

/// One page of an admin's history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryPage {
    pub admin: Address,
    pub page: u32,
    pub entries: Vec<HistoryEntry>,
}

impl HistoryPage {
    pub fn new(env: &Env, admin: Address, page: u32) -> Self {
        Self {
            admin,
            page,
            entries: Vec::new(env),
        }
    }

    pub(crate) fn write_fields(&self, w: &mut Writer) -> Result<(), ContractError> {
        w.put_identity(&self.admin)?;
        w.put_u32(self.page);
        w.put_u32(self.entries.len());
        for entry in self.entries.iter() {
            entry.write_fields(w)?;
        }
        Ok(())
    }

    pub(crate) fn read_fields(env: &Env, r: &mut Reader) -> Result<Self, ContractError> {
        let admin = r.read_identity()?;
        let page = r.read_u32()?;
        let count = r.read_u32()?;
        if count > MAX_PAGE_CAPACITY {
            return Err(ContractError::MalformedAccount);
        }
        let mut entries = Vec::new(env);
        for _ in 0..count {
            entries.push_back(HistoryEntry::read_fields(r)?);
        }
        Ok(Self {
            admin,
            page,
            entries,
        })
    }

    fn check_identity(&self, admin: &Address, page: u32) -> Result<(), ContractError> {
        if self.admin != *admin || self.page != page {
            return Err(ContractError::MalformedAccount);
        }
        Ok(())
    }
}

/// Header and tail page loaded ahead of an append so that all reads precede
/// all writes.
pub struct HistoryAppender {
    header_address: BytesN<32>,
    header: HistoryLedger,
    tail_address: BytesN<32>,
    tail: HistoryPage,
}

impl HistoryAppender {
    /// Loads the header and current tail page, opening a fresh page when
    /// there is none yet or the tail already holds `capacity` entries.
    pub fn open(txn: &Txn, admin: &Address, capacity: u32) -> Result<Self, ContractError> {
        let env = txn.env();
        let header_address = addresses::history_address(env, admin)?;

        let mut header = match txn.load_history(&header_address)? {
            Some(header) => {
                header.check_identity(admin)?;
                header
            }
            None => HistoryLedger::new(admin.clone()),
        };

        let current = match header.page_count.checked_sub(1) {
            Some(last) => {
                let address = addresses::history_page_address(env, admin, last)?;
                let page = txn
                    .load_history_page(&address)?
                    .ok_or(ContractError::MalformedAccount)?;
                page.check_identity(admin, last)?;
                Some((address, page))
            }
            None => None,
        };

        let (tail_address, tail) = match current {
            Some((address, page)) if page.entries.len() < capacity => (address, page),
            _ => {
                let next = header.page_count;
                let address = addresses::history_page_address(env, admin, next)?;
                if txn.load(&address)?.is_some() {
                    return Err(ContractError::MalformedAccount);
                }
                header.page_count = next
                    .checked_add(1)
                    .ok_or(ContractError::MalformedAccount)?;
                (address, HistoryPage::new(env, admin.clone(), next))
            }
        };

        Ok(Self {
            header_address,
            header,
            tail_address,
            tail,
        })
    }

    /// Pushes `entry` and stages the header and tail page. Returns the page
    /// and the entry's position within it.
    pub fn append(mut self, txn: &mut Txn, entry: HistoryEntry) -> Result<(u32, u32), ContractError> {
        let position = self.tail.entries.len();
        self.tail.entries.push_back(entry);
        self.header.total_len = self
            .header
            .total_len
            .checked_add(1)
            .ok_or(ContractError::MalformedAccount)?;

        txn.stage_history(&self.header_address, &self.header)?;
        txn.stage_history_page(&self.tail_address, &self.tail)?;
        Ok((self.tail.page, position))
    }
}

/// Returns the header, or `None` when `admin` never changed an authority.
pub fn read_header(env: &Env, admin: &Address) -> Result<Option<HistoryLedger>, ContractError> {
    let address = addresses::history_address(env, admin)?;
    let header = store::load_committed(env, &address)?
        .map(|account| account.into_history())
        .transpose()?;
    if let Some(header) = &header {
        header.check_identity(admin)?;
    }
    Ok(header)
}

/// Returns one page, or `None` when it does not exist.
pub fn read_page(env: &Env, admin: &Address, page: u32) -> Result<Option<HistoryPage>, ContractError> {
    let address = addresses::history_page_address(env, admin, page)?;
    let found = store::load_committed(env, &address)?
        .map(|account| account.into_history_page())
        .transpose()?;
    if let Some(found) = &found {
        found.check_identity(admin, page)?;
    }
    Ok(found)
}

/// Entries of pages `start_page..start_page + max_pages` in insertion order.
/// At most [`MAX_PAGES_PER_READ`] pages are decoded per call.
pub fn read_range(
    env: &Env,
    admin: &Address,
    start_page: u32,
    max_pages: u32,
) -> Result<Vec<HistoryEntry>, ContractError> {
    let mut entries = Vec::new(env);
    let header = match read_header(env, admin)? {
        Some(header) => header,
        None => return Ok(entries),
    };

    let end = start_page
        .saturating_add(max_pages.min(MAX_PAGES_PER_READ))
        .min(header.page_count);
    for index in start_page..end {
        let page = read_page(env, admin, index)?.ok_or(ContractError::MalformedAccount)?;
        entries.append(&page.entries);
    }
    Ok(entries)
}

/// Total number of entries, read from the header alone.
pub fn total_len(env: &Env, admin: &Address) -> Result<u64, ContractError> {
    Ok(read_header(env, admin)?.map_or(0, |header| header.total_len))
}
