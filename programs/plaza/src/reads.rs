//! Client-side reads over fetched program accounts.
//!
//! Solana return data is capped at 1024 bytes, so pages of replies cannot come
//! back from an instruction. Clients derive the PDAs here, fetch them from any
//! [`AccountSource`] (an RPC client, a test bank, a cache) and get the same
//! answers the on-chain lookups give.

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::{AccountDeserialize, Owner};

use crate::errors::PlazaError;
use crate::state::{
    self, page_range, Delegation, EntityId, Profile, Reply, ReplyLedger, ReplyList, ReplyLocator,
    Tally, VoteRecord, VoteTally, VoteType,
};

/// Raw account as returned by a fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedAccount {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

pub trait AccountSource {
    /// None when nothing lives at `address`
    fn fetch(&self, address: &Pubkey) -> Option<FetchedAccount>;
}

fn load<T, S>(source: &S, address: &Pubkey) -> Result<Option<T>>
where
    T: AccountDeserialize + Owner,
    S: AccountSource + ?Sized,
{
    match source.fetch(address) {
        Some(account) if account.owner == T::owner() && !account.data.is_empty() => {
            T::try_deserialize(&mut account.data.as_slice()).map(Some)
        }
        _ => Ok(None),
    }
}

pub fn resolve_effective_identity<S: AccountSource + ?Sized>(
    source: &S,
    signer: &Pubkey,
) -> Result<Pubkey> {
    let delegation = load::<Delegation, _>(source, &Delegation::address(signer).0)?;
    Ok(state::resolve_effective_identity(signer, delegation.as_ref()))
}

pub fn is_delegate<S: AccountSource + ?Sized>(
    source: &S,
    candidate: &Pubkey,
    primary: &Pubkey,
) -> Result<bool> {
    let delegation = load::<Delegation, _>(source, &Delegation::address(candidate).0)?;
    Ok(delegation.map_or(false, |d| d.acts_for(primary)))
}

pub fn get_profile<S: AccountSource + ?Sized>(
    source: &S,
    identity: &Pubkey,
) -> Result<Option<Profile>> {
    let profile = load::<Profile, _>(source, &Profile::address(identity).0)?;
    Ok(profile.filter(|p| p.exists))
}

pub fn has_profile<S: AccountSource + ?Sized>(source: &S, identity: &Pubkey) -> Result<bool> {
    Ok(get_profile(source, identity)?.is_some())
}

pub fn get_tally<S: AccountSource + ?Sized>(source: &S, entity_id: &EntityId) -> Result<Tally> {
    let tally = load::<VoteTally, _>(source, &VoteTally::address(entity_id).0)?;
    Ok(tally.map(|t| t.tally()).unwrap_or_default())
}

pub fn get_vote<S: AccountSource + ?Sized>(
    source: &S,
    entity_id: &EntityId,
    voter: &Pubkey,
) -> Result<Option<VoteType>> {
    let record = load::<VoteRecord, _>(source, &VoteRecord::address(entity_id, voter).0)?;
    Ok(record.and_then(|r| r.vote))
}

/// Slots used under `entity_id`, deleted replies included
pub fn get_reply_count<S: AccountSource + ?Sized>(
    source: &S,
    entity_id: &EntityId,
) -> Result<u64> {
    let list = load::<ReplyList, _>(source, &ReplyList::address(entity_id).0)?;
    Ok(list.map_or(0, |l| l.reply_count))
}

/// A single reply by global id; ids never issued fail with IndexOutOfBounds.
pub fn get_reply<S: AccountSource + ?Sized>(source: &S, reply_id: u64) -> Result<Reply> {
    let ledger = load::<ReplyLedger, _>(source, &ReplyLedger::address().0)?.unwrap_or_default();
    require!(ledger.contains(reply_id), PlazaError::IndexOutOfBounds);

    let locator = load::<ReplyLocator, _>(source, &ReplyLocator::address(reply_id).0)?
        .ok_or(ErrorCode::AccountNotInitialized)?;
    load_slot(source, &locator.parent_entity, locator.position)
}

/// Replies under `entity_id` in creation order, starting at slot `offset`.
///
/// Out-of-range pages come back empty; `count` is clamped to what remains.
/// Deleted replies keep their slot and are returned as tombstones.
pub fn get_replies_for<S: AccountSource + ?Sized>(
    source: &S,
    entity_id: &EntityId,
    offset: u64,
    count: u64,
) -> Result<Vec<Reply>> {
    let total = get_reply_count(source, entity_id)?;
    page_range(total, offset, count)
        .map(|position| load_slot(source, entity_id, position))
        .collect()
}

fn load_slot<S: AccountSource + ?Sized>(
    source: &S,
    entity_id: &EntityId,
    position: u64,
) -> Result<Reply> {
    let reply = load::<Reply, _>(source, &Reply::address(entity_id, position).0)?;
    reply.ok_or_else(|| ErrorCode::AccountNotInitialized.into())
}
