// =============================================================================
// PLAZA STATE MODULE
// =============================================================================
//
// Accounts owned by the Plaza core:
// - Profile / Delegation: who a signer acts for
// - EntityId: canonical name for any piece of content in any registry
// - VoteTally / VoteRecord: up/down interactions keyed by entity id
// - ReplyLedger / ReplyList / Reply / ReplyLocator: threaded replies keyed by
//   entity id, each reply addressable as an entity in turn
//
// Content registries (channels, threads, posts, messages) live outside this
// program and only meet the core through identity resolution and entity ids.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::system_program;
use anchor_lang::{AccountDeserialize, AccountSerialize, Owner};

use crate::errors::PlazaError;

pub mod entity;
pub mod identity;
pub mod replies;
pub mod voting;

pub use entity::*;
pub use identity::*;
pub use replies::*;
pub use voting::*;

/// Load a program account that may not have been created yet.
///
/// PDAs are deterministic, so a missing account is a valid state ("no profile",
/// "no delegation", "no votes") rather than an error. Accounts owned by anyone
/// else, including closed accounts handed back to the system program, read as
/// absent.
pub fn load_optional<T>(info: &AccountInfo) -> Result<Option<T>>
where
    T: AccountDeserialize + Owner,
{
    if info.owner != &T::owner() || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}

/// Load a program account that must exist, failing with `missing` otherwise.
pub fn load_required<T>(info: &AccountInfo, missing: PlazaError) -> Result<T>
where
    T: AccountDeserialize + Owner,
{
    match load_optional::<T>(info)? {
        Some(account) => Ok(account),
        None => Err(missing.into()),
    }
}

/// Write `account` back over the data of `info`.
pub fn store_account<T: AccountSerialize>(account: &T, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    account.try_serialize(&mut writer)
}

/// Drain `info` into `destination` and hand it back to the system program.
pub fn close_account(info: &AccountInfo, destination: &AccountInfo) -> Result<()> {
    let balance = destination
        .lamports()
        .checked_add(info.lamports())
        .ok_or(PlazaError::ArithmeticOverflow)?;
    **destination.try_borrow_mut_lamports()? = balance;
    **info.try_borrow_mut_lamports()? = 0;

    info.assign(&system_program::ID);
    info.realloc(0, false)?;
    Ok(())
}

/// Owned backing storage for an `AccountInfo` in unit tests
#[cfg(test)]
pub(crate) struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[cfg(test)]
impl TestAccount {
    /// Nothing created at `key` yet
    pub fn empty(key: Pubkey) -> Self {
        Self {
            key,
            owner: system_program::ID,
            lamports: 0,
            data: Vec::new(),
        }
    }

    /// `account` serialized into `space` bytes owned by this program
    pub fn program<T: AccountSerialize>(key: Pubkey, account: &T, space: usize) -> Self {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        data.resize(space, 0);
        Self {
            key,
            owner: crate::ID,
            lamports: 1_000_000,
            data,
        }
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            true,
            &mut self.lamports,
            self.data.as_mut_slice(),
            &self.owner,
            false,
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_plaza_error;

    #[test]
    fn absent_and_foreign_accounts_load_as_none() {
        let key = Pubkey::new_unique();
        let mut empty = TestAccount::empty(key);
        assert!(load_optional::<Delegation>(&empty.info()).unwrap().is_none());

        let mut foreign = TestAccount::program(key, &Delegation::default(), Delegation::SIZE);
        foreign.owner = Pubkey::new_unique();
        assert!(load_optional::<Delegation>(&foreign.info()).unwrap().is_none());
    }

    #[test]
    fn required_accounts_fail_with_the_given_error() {
        let mut empty = TestAccount::empty(Pubkey::new_unique());
        assert_plaza_error(
            load_required::<Profile>(&empty.info(), PlazaError::ProfileRequired),
            PlazaError::ProfileRequired,
        );
        assert_plaza_error(
            load_required::<ReplyLocator>(&empty.info(), PlazaError::IndexOutOfBounds),
            PlazaError::IndexOutOfBounds,
        );
    }

    #[test]
    fn stored_changes_read_back() {
        let owner = Pubkey::new_unique();
        let mut profile = Profile::default();
        profile
            .initialize(owner, "Short".to_string(), String::new(), 1, 255)
            .unwrap();
        let address = Profile::address(&owner).0;
        let mut account = TestAccount::program(address, &profile, Profile::SIZE);

        let info = account.info();
        let mut loaded = load_required::<Profile>(&info, PlazaError::ProfileRequired).unwrap();
        loaded
            .update("A much longer display name".to_string(), "bio".to_string(), 2)
            .unwrap();
        store_account(&loaded, &info).unwrap();

        let reloaded = load_required::<Profile>(&info, PlazaError::ProfileRequired).unwrap();
        assert_eq!(reloaded, loaded);
        assert_eq!(reloaded.display_name, "A much longer display name");
    }
}
