use anchor_lang::prelude::*;

use crate::errors::PlazaError;
use crate::state::load_optional;

// =============================================================================
// IDENTITY REGISTRY
// =============================================================================
//
// A primary identity owns a Profile and may authorize any number of delegate
// (session) keys. Every write path in the platform resolves its signer through
// `resolve_effective_identity` before treating the write as authorized.
//
// Resolution is exactly one hop: the delegation recorded for the signer is
// consulted, the delegation of its primary never is.
// =============================================================================

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_BIO_LENGTH: usize = 280;
pub const MAX_LINKS: usize = 5;
pub const MAX_LINK_NAME_LENGTH: usize = 32;
pub const MAX_LINK_URL_LENGTH: usize = 128;

/// A named external link shown on a profile
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub const SIZE: usize = 4 + MAX_LINK_NAME_LENGTH + 4 + MAX_LINK_URL_LENGTH;

    pub fn new(name: String, url: String) -> Result<Self> {
        require!(
            !name.is_empty() && name.len() <= MAX_LINK_NAME_LENGTH,
            PlazaError::LinkInvalid
        );
        require!(
            !url.is_empty() && url.len() <= MAX_LINK_URL_LENGTH,
            PlazaError::LinkInvalid
        );
        Ok(Self { name, url })
    }
}

/// Public profile of a primary identity
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct Profile {
    /// The primary identity owning this profile
    pub owner: Pubkey,
    pub display_name: String,
    pub bio: String,
    pub links: Vec<Link>,
    /// Set once on creation, never cleared
    pub exists: bool,
    pub created_at: i64,
    pub updated_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl Profile {
    pub const SEED: &'static [u8] = b"profile";

    pub const SIZE: usize = 8 +             // discriminator
        32 +                                 // owner
        4 + MAX_NAME_LENGTH +                // display_name
        4 + MAX_BIO_LENGTH +                 // bio
        4 + MAX_LINKS * Link::SIZE +         // links
        1 +                                  // exists
        8 +                                  // created_at
        8 +                                  // updated_at
        1;                                   // bump

    pub fn address(owner: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, owner.as_ref()], &crate::ID)
    }

    /// Fill a freshly allocated profile. Fails if the owner already has one.
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        display_name: String,
        bio: String,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.exists, PlazaError::AlreadyExists);
        validate_display_name(&display_name)?;
        validate_bio(&bio)?;

        self.owner = owner;
        self.display_name = display_name;
        self.bio = bio;
        self.links = Vec::new();
        self.exists = true;
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        Ok(())
    }

    pub fn update(&mut self, display_name: String, bio: String, now: i64) -> Result<()> {
        require!(self.exists, PlazaError::ProfileRequired);
        validate_display_name(&display_name)?;
        validate_bio(&bio)?;

        self.display_name = display_name;
        self.bio = bio;
        self.updated_at = now;
        Ok(())
    }

    pub fn add_link(&mut self, link: Link, now: i64) -> Result<()> {
        require!(self.exists, PlazaError::ProfileRequired);
        require!(self.links.len() < MAX_LINKS, PlazaError::TooManyLinks);

        self.links.push(link);
        self.updated_at = now;
        Ok(())
    }

    /// Remove the link at `index`, keeping the order of the rest.
    pub fn remove_link(&mut self, index: u32, now: i64) -> Result<Link> {
        require!(self.exists, PlazaError::ProfileRequired);
        let index = index as usize;
        require!(index < self.links.len(), PlazaError::IndexOutOfBounds);

        let link = self.links.remove(index);
        self.updated_at = now;
        Ok(link)
    }
}

fn validate_display_name(name: &str) -> Result<()> {
    require!(!name.is_empty(), PlazaError::NameEmpty);
    require!(name.len() <= MAX_NAME_LENGTH, PlazaError::NameTooLong);
    Ok(())
}

fn validate_bio(bio: &str) -> Result<()> {
    require!(bio.len() <= MAX_BIO_LENGTH, PlazaError::BioTooLong);
    Ok(())
}

/// Binds one delegate key to one primary identity.
///
/// Keyed by the delegate alone, so a delegate can act for at most one primary
/// at a time. Closing the account releases the delegate.
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct Delegation {
    /// The secondary signing key
    pub delegate: Pubkey,
    /// The identity the delegate acts for
    pub primary: Pubkey,
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl Delegation {
    pub const SEED: &'static [u8] = b"delegation";

    pub const SIZE: usize = 8 + 32 + 32 + 8 + 1;

    pub fn address(delegate: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, delegate.as_ref()], &crate::ID)
    }

    pub fn is_active(&self) -> bool {
        self.primary != Pubkey::default()
    }

    pub fn acts_for(&self, primary: &Pubkey) -> bool {
        self.is_active() && self.primary == *primary
    }

    /// Record `delegate` as acting for `primary`.
    pub fn bind(&mut self, delegate: Pubkey, primary: Pubkey, now: i64, bump: u8) -> Result<()> {
        require!(
            delegate != Pubkey::default() && delegate != primary,
            PlazaError::InvalidAddress
        );
        require!(!self.is_active(), PlazaError::AlreadyExists);

        self.delegate = delegate;
        self.primary = primary;
        self.created_at = now;
        self.bump = bump;
        Ok(())
    }
}

/// The identity `signer` acts for: its primary when `delegation` binds it,
/// otherwise the signer itself.
pub fn resolve_effective_identity(signer: &Pubkey, delegation: Option<&Delegation>) -> Pubkey {
    match delegation {
        Some(d) if d.is_active() && d.delegate == *signer => d.primary,
        _ => *signer,
    }
}

/// Resolve `signer` through its delegation account and require the result to
/// be `claimed`.
pub fn authorize(signer: &Pubkey, delegation: &AccountInfo, claimed: &Pubkey) -> Result<Pubkey> {
    let delegation = load_optional::<Delegation>(delegation)?;
    let effective = resolve_effective_identity(signer, delegation.as_ref());
    require_keys_eq!(effective, *claimed, PlazaError::NotAuthorized);
    Ok(effective)
}

/// A key may hand out delegates only while it is not acting for someone else.
pub fn ensure_can_delegate(owner_delegation: &AccountInfo) -> Result<()> {
    require!(
        load_optional::<Delegation>(owner_delegation)?.is_none(),
        PlazaError::NotAuthorized
    );
    Ok(())
}

/// Whether `owner` may close the delegation at `delegation`. Missing
/// delegations and ones bound to another primary are left alone.
pub fn revocable_by(delegation: &AccountInfo, owner: &Pubkey) -> Result<bool> {
    let delegation = load_optional::<Delegation>(delegation)?;
    Ok(delegation.map_or(false, |d| d.acts_for(owner)))
}
