use std::collections::HashMap;

use crate::domain::RegistryError;
use crate::registry::contract_versions::{ContractVersions, VersionHistory};

#[derive(Default)]
pub struct NetworkContracts {
    contracts: HashMap<String, Box<dyn VersionHistory>>,
}

impl NetworkContracts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C, D>(
        &mut self,
        name: impl Into<String>,
        versions: ContractVersions<C, D>,
    ) -> Result<(), RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        let name = name.into();
        if self.contracts.contains_key(&name) {
            return Err(RegistryError::DuplicateContract(name));
        }

        self.contracts.insert(name, Box::new(versions));
        Ok(())
    }

    pub fn contract_available(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn history(&self, name: &str) -> Result<&dyn VersionHistory, RegistryError> {
        self.contracts
            .get(name)
            .map(|history| history.as_ref())
            .ok_or_else(|| RegistryError::ContractUnavailable(name.to_string()))
    }

    pub fn get_contract_versions<C, D>(
        &self,
        name: &str,
    ) -> Result<&ContractVersions<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        self.history(name)?
            .as_any()
            .downcast_ref::<ContractVersions<C, D>>()
            .ok_or_else(|| RegistryError::BindingsMismatch(name.to_string()))
    }

    pub fn get_contract_versions_mut<C, D>(
        &mut self,
        name: &str,
    ) -> Result<&mut ContractVersions<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        let history = self
            .contracts
            .get_mut(name)
            .ok_or_else(|| RegistryError::ContractUnavailable(name.to_string()))?;

        history
            .as_any_mut()
            .downcast_mut::<ContractVersions<C, D>>()
            .ok_or_else(|| RegistryError::BindingsMismatch(name.to_string()))
    }
}

impl std::fmt::Debug for NetworkContracts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.contracts.iter().map(|(name, history)| (name, history.records())))
            .finish()
    }
}
