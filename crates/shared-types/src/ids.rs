//! # Entity Identifiers
//!
//! Canonical `(shard, realm, num)` identity and the two protocol-boundary
//! forms that resolve to it.
//!
//! ## Encoding
//!
//! An `EntityId` packs into a single `i64` as
//! `shard (10 bits) | realm (16 bits) | num (38 bits)`. The all-zero id is
//! the `EMPTY` sentinel for "not present / not resolved".
//!
//! ## Protocol Forms
//!
//! - [`AccountId`]: numeric account number or an alias (serialized key bytes
//!   or a 20-byte EVM address).
//! - [`ContractId`]: numeric contract number or a 20-byte EVM address.
//!
//! Tokens, topics, files and schedules are never aliased and are carried
//! as plain `EntityId` values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::InvalidEntityId;

/// Length of an EVM address in bytes.
pub const EVM_ADDRESS_LENGTH: usize = 20;

const SHARD_BITS: u32 = 10;
const REALM_BITS: u32 = 16;
const NUM_BITS: u32 = 38;

const SHARD_MASK: i64 = (1 << SHARD_BITS) - 1;
const REALM_MASK: i64 = (1 << REALM_BITS) - 1;
const NUM_MASK: i64 = (1 << NUM_BITS) - 1;

/// Canonical identity of any ledger entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct EntityId {
    pub shard: i64,
    pub realm: i64,
    pub num: i64,
}

impl EntityId {
    /// Sentinel for "not present / not resolved".
    pub const EMPTY: EntityId = EntityId {
        shard: 0,
        realm: 0,
        num: 0,
    };

    /// Build an id, rejecting components that do not fit the encoding.
    pub fn of(shard: i64, realm: i64, num: i64) -> Result<Self, InvalidEntityId> {
        if !(0..=SHARD_MASK).contains(&shard)
            || !(0..=REALM_MASK).contains(&realm)
            || !(0..=NUM_MASK).contains(&num)
        {
            return Err(InvalidEntityId::OutOfRange { shard, realm, num });
        }
        Ok(Self { shard, realm, num })
    }

    /// Shorthand for ids in shard 0, realm 0.
    pub const fn num(num: i64) -> Self {
        Self {
            shard: 0,
            realm: 0,
            num,
        }
    }

    /// True for the `EMPTY` sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Packed `i64` form used as the primary key of entity rows.
    pub fn encoded(&self) -> i64 {
        ((self.shard & SHARD_MASK) << (REALM_BITS + NUM_BITS))
            | ((self.realm & REALM_MASK) << NUM_BITS)
            | (self.num & NUM_MASK)
    }

    /// Inverse of [`EntityId::encoded`].
    pub fn decode(encoded: i64) -> Result<Self, InvalidEntityId> {
        if encoded < 0 {
            return Err(InvalidEntityId::NegativeEncoding(encoded));
        }
        Ok(Self {
            shard: (encoded >> (REALM_BITS + NUM_BITS)) & SHARD_MASK,
            realm: (encoded >> NUM_BITS) & REALM_MASK,
            num: encoded & NUM_MASK,
        })
    }

    /// Decode a "long-zero" EVM address: 12 leading zero bytes followed by
    /// the big-endian entity number. Returns `None` for any other address.
    pub fn from_long_zero_address(shard: i64, realm: i64, address: &[u8]) -> Option<Self> {
        if address.len() != EVM_ADDRESS_LENGTH || address[..12].iter().any(|b| *b != 0) {
            return None;
        }
        let mut num_bytes = [0u8; 8];
        num_bytes.copy_from_slice(&address[12..]);
        Self::of(shard, realm, i64::from_be_bytes(num_bytes)).ok()
    }

    /// The long-zero EVM address of this id.
    pub fn to_long_zero_address(&self) -> [u8; EVM_ADDRESS_LENGTH] {
        let mut address = [0u8; EVM_ADDRESS_LENGTH];
        address[12..].copy_from_slice(&self.num.to_be_bytes());
        address
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl FromStr for EntityId {
    type Err = InvalidEntityId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [shard, realm, num] = parts.as_slice() else {
            return Err(InvalidEntityId::Malformed(s.to_string()));
        };
        let parse = |part: &str| {
            part.parse::<i64>()
                .map_err(|_| InvalidEntityId::Malformed(s.to_string()))
        };
        Self::of(parse(shard)?, parse(realm)?, parse(num)?)
    }
}

/// Account reference as it appears in a transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRef {
    /// Numeric account number; `0` means "not set".
    Num(i64),
    /// Serialized public key or 20-byte EVM address.
    Alias(Vec<u8>),
}

/// Protocol account id, possibly aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId {
    pub shard: i64,
    pub realm: i64,
    pub account: AccountRef,
}

impl AccountId {
    pub fn num(num: i64) -> Self {
        Self {
            shard: 0,
            realm: 0,
            account: AccountRef::Num(num),
        }
    }

    pub fn alias(alias: impl Into<Vec<u8>>) -> Self {
        Self {
            shard: 0,
            realm: 0,
            account: AccountRef::Alias(alias.into()),
        }
    }

    /// The protocol default instance: numeric form with number zero.
    pub fn is_default(&self) -> bool {
        self.shard == 0 && self.realm == 0 && self.account == AccountRef::Num(0)
    }
}

impl From<EntityId> for AccountId {
    fn from(id: EntityId) -> Self {
        Self {
            shard: id.shard,
            realm: id.realm,
            account: AccountRef::Num(id.num),
        }
    }
}

/// Contract reference as it appears in a transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractRef {
    /// Numeric contract number; `0` means "not set".
    Num(i64),
    /// 20-byte EVM address.
    EvmAddress(Vec<u8>),
}

/// Protocol contract id, possibly addressed by EVM address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId {
    pub shard: i64,
    pub realm: i64,
    pub contract: ContractRef,
}

impl ContractId {
    pub fn num(num: i64) -> Self {
        Self {
            shard: 0,
            realm: 0,
            contract: ContractRef::Num(num),
        }
    }

    pub fn evm_address(address: impl Into<Vec<u8>>) -> Self {
        Self {
            shard: 0,
            realm: 0,
            contract: ContractRef::EvmAddress(address.into()),
        }
    }
}

impl From<EntityId> for ContractId {
    fn from(id: EntityId) -> Self {
        Self {
            shard: id.shard,
            realm: id.realm,
            contract: ContractRef::Num(id.num),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        assert!(EntityId::EMPTY.is_empty());
        assert!(EntityId::default().is_empty());
        assert!(!EntityId::num(2).is_empty());
    }

    #[test]
    fn test_encoding_layout() {
        let id = EntityId::of(1, 2, 3).unwrap();
        assert_eq!(id.encoded(), (1i64 << 54) | (2i64 << 38) | 3);
        assert_eq!(EntityId::decode(id.encoded()).unwrap(), id);
        assert_eq!(EntityId::num(98).encoded(), 98);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(EntityId::of(1024, 0, 0).is_err());
        assert!(EntityId::of(0, 65536, 0).is_err());
        assert!(EntityId::of(0, 0, 1 << 38).is_err());
        assert!(EntityId::of(-1, 0, 0).is_err());
        assert!(EntityId::decode(-5).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let id: EntityId = "0.0.1001".parse().unwrap();
        assert_eq!(id, EntityId::num(1001));
        assert_eq!(id.to_string(), "0.0.1001");
        assert!("0.1001".parse::<EntityId>().is_err());
        assert!("a.b.c".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_long_zero_address() {
        let id = EntityId::num(5005);
        let address = id.to_long_zero_address();
        assert_eq!(EntityId::from_long_zero_address(0, 0, &address), Some(id));

        let mut evm = [0xABu8; 20];
        evm[19] = 1;
        assert_eq!(EntityId::from_long_zero_address(0, 0, &evm), None);
        assert_eq!(EntityId::from_long_zero_address(0, 0, &address[..19]), None);
    }

    #[test]
    fn test_default_account_id() {
        assert!(AccountId::num(0).is_default());
        assert!(!AccountId::num(3).is_default());
        assert!(!AccountId::alias(vec![1, 2]).is_default());
    }
}
