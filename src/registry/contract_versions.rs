use std::any::Any;
use std::fmt::{Debug, Formatter};

use alloy::primitives::Address;
use alloy::providers::DynProvider;

use crate::domain::{ContractVersion, NotFound};
use crate::evm::Bindings;

pub struct ResolvedContract<C, D> {
    pub address: Address,
    pub deployed_at: u64,
    pub bindings: Bindings<C, D>,
}

impl<C, D> ResolvedContract<C, D> {
    pub fn version(&self) -> ContractVersion {
        ContractVersion::new(self.address, self.deployed_at)
    }

    pub fn instance(&self, connection: DynProvider) -> C {
        (self.bindings.factory)(self.address, connection)
    }

    pub fn deferred(&self) -> D {
        (self.bindings.multicall_factory)(self.address)
    }
}

impl<C, D> Clone for ResolvedContract<C, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, D> Copy for ResolvedContract<C, D> {}

impl<C, D> PartialEq for ResolvedContract<C, D> {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.deployed_at == other.deployed_at
    }
}

impl<C, D> Debug for ResolvedContract<C, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedContract")
            .field("address", &self.address)
            .field("deployed_at", &self.deployed_at)
            .finish()
    }
}

/// Ordered by deployment block.
pub struct ContractVersions<C, D> {
    versions: Vec<ContractVersion>,
    bindings: Bindings<C, D>,
}

impl<C, D> ContractVersions<C, D> {
    pub fn new(bindings: Bindings<C, D>) -> Self {
        Self {
            versions: Vec::new(),
            bindings,
        }
    }

    pub fn with_versions(bindings: Bindings<C, D>, versions: Vec<ContractVersion>) -> Self {
        let mut versions = versions;
        // stable: equal heights keep their given order
        versions.sort_by_key(|version| version.deployed_at);
        Self { versions, bindings }
    }

    pub fn add(&mut self, version: ContractVersion) {
        let position = self
            .versions
            .partition_point(|existing| existing.deployed_at <= version.deployed_at);
        self.versions.insert(position, version);
    }

    pub fn bindings(&self) -> Bindings<C, D> {
        self.bindings
    }

    pub fn versions(&self) -> &[ContractVersion] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn get_version(&self, index: usize) -> Result<ResolvedContract<C, D>, NotFound> {
        version_at_index(&self.versions, index).map(|version| self.resolve(version))
    }

    pub fn at_block(&self, block: u64) -> Result<ResolvedContract<C, D>, NotFound> {
        version_at_block(&self.versions, block).map(|version| self.resolve(version))
    }

    pub fn latest(&self) -> Result<ResolvedContract<C, D>, NotFound> {
        latest_version(&self.versions).map(|version| self.resolve(version))
    }

    fn resolve(&self, version: &ContractVersion) -> ResolvedContract<C, D> {
        ResolvedContract {
            address: version.address,
            deployed_at: version.deployed_at,
            bindings: self.bindings,
        }
    }
}

impl<C, D> Debug for ContractVersions<C, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractVersions")
            .field("versions", &self.versions)
            .field("bindings", &self.bindings)
            .finish()
    }
}

fn version_at_index(versions: &[ContractVersion], index: usize) -> Result<&ContractVersion, NotFound> {
    versions.get(index).ok_or(NotFound::Index {
        index,
        count: versions.len(),
    })
}

fn version_at_block(versions: &[ContractVersion], block: u64) -> Result<&ContractVersion, NotFound> {
    versions
        .iter()
        .rev()
        .find(|version| version.deployed_at <= block)
        .ok_or(NotFound::Block(block))
}

fn latest_version(versions: &[ContractVersion]) -> Result<&ContractVersion, NotFound> {
    versions.last().ok_or(NotFound::Empty)
}

/// Type-erased view of a [`ContractVersions`], as stored per network.
pub trait VersionHistory: Send + Sync {
    fn records(&self) -> &[ContractVersion];

    fn latest_deferred(&self) -> Result<Box<dyn Any + Send>, NotFound>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn record(&self, index: usize) -> Result<ContractVersion, NotFound> {
        version_at_index(self.records(), index).copied()
    }

    fn record_at_block(&self, block: u64) -> Result<ContractVersion, NotFound> {
        version_at_block(self.records(), block).copied()
    }

    fn latest_record(&self) -> Result<ContractVersion, NotFound> {
        latest_version(self.records()).copied()
    }
}

impl<C: 'static, D: Send + 'static> VersionHistory for ContractVersions<C, D> {
    fn records(&self) -> &[ContractVersion] {
        &self.versions
    }

    fn latest_deferred(&self) -> Result<Box<dyn Any + Send>, NotFound> {
        let latest = self.latest()?;
        Ok(Box::new(latest.deferred()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
