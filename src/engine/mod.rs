//! The allocation and composition front end.
//!
//! An [`Engine`] carries an explicit [`EngineConfig`] instead of process-wide state: every
//! tensor it creates inherits the configured meaning of [`Order::Default`] and whether
//! chunk-wise reductions may run in parallel.

use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::loom::{
    num::Scalar,
    order::Order,
    storage::StorageManager,
    tensor::{Policy, TensorError},
};

pub use allocate::OfType;

mod allocate;
mod join;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EngineConfig {
    /// What [`Order::Default`] resolves to. Must be [`Order::C`] or [`Order::F`].
    pub default_order: Order,
    /// Allows chunk-parallel reductions when the `rayon` feature is on.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_order: Order::C,
            parallel: true,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Engine {
    config: EngineConfig,
    manager: StorageManager,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, TensorError> {
        if !config.default_order.is_fixed() {
            return Err(TensorError::Order(config.default_order));
        }
        log::debug!("engine created with {config:?}");
        Ok(Self {
            config,
            manager: StorageManager,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn manager(&self) -> &StorageManager {
        &self.manager
    }

    /// The policy handed to every tensor this engine creates.
    #[inline]
    pub fn policy(&self) -> Policy {
        Policy {
            order: self.config.default_order,
            parallel: self.config.parallel,
        }
    }

    /// Typed allocation for element type `T`.
    #[inline]
    pub fn of<T: Scalar>(&self) -> OfType<'_, T> {
        OfType {
            engine: self,
            phantom: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{Engine, EngineConfig};
    use crate::loom::{order::Order, tensor::TensorError};

    #[test]
    fn test_config() -> Result<(), Box<dyn Error>> {
        let engine = Engine::default();
        assert_eq!(engine.config(), &EngineConfig::default());
        assert_eq!(engine.policy().order, Order::C);

        let config = EngineConfig {
            default_order: Order::F,
            parallel: false,
        };
        let engine = Engine::new(config)?;
        assert_eq!(engine.policy().order, Order::F);
        assert!(!engine.policy().parallel);

        for default_order in [Order::A, Order::Default] {
            let config = EngineConfig {
                default_order,
                ..Default::default()
            };
            assert!(matches!(Engine::new(config), Err(TensorError::Order(_))));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde() -> Result<(), Box<dyn Error>> {
        let config: EngineConfig = serde_json::from_str(r#"{ "default_order": "F" }"#)?;
        assert_eq!(config.default_order, Order::F);
        assert!(config.parallel);

        let json = serde_json::to_string(&config)?;
        assert_eq!(serde_json::from_str::<EngineConfig>(&json)?, config);
        Ok(())
    }
}
