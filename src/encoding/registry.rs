// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message registry for name-based lookup of built-in types.
//!
//! Types are added by explicit registration calls rather than discovered at
//! runtime. Each entry carries the type's definition text and two
//! monomorphized function pointers, so callers that only know a type name
//! (the CLI, tooling) can decode or generate instances without naming the
//! Rust type.
//!
//! # Example
//!
//! ```
//! use roswire::encoding::registry::global_registry;
//!
//! let entry = global_registry().entry("geometry_msgs/Point").unwrap();
//! let bytes = (entry.random)(7);
//! let decoded = (entry.decode)(&bytes).unwrap();
//! assert_eq!(decoded.len(), 3);
//! ```

use std::fmt;
use std::sync::OnceLock;

use crate::core::{CodecError, DecodedMessage, Result, TypeRegistry};
use crate::message::{random_instance, Randomize, RosMessage, RosService};
use crate::msgs::{geometry_msgs, motion_msgs, sensor_msgs, std_msgs};
use crate::schema::{parse_schema, MessageSchema};

/// Decode raw bytes into a dynamic message.
pub type DecodeFn = fn(&[u8]) -> Result<DecodedMessage>;

/// Encode a reproducible random instance from a seed.
pub type RandomFn = fn(u64) -> Vec<u8>;

/// Registered message type.
#[derive(Clone)]
pub struct MessageEntry {
    pub type_name: &'static str,
    /// Full definition text, dependencies included.
    pub definition: String,
    pub decode: DecodeFn,
    pub random: RandomFn,
}

impl MessageEntry {
    /// Build the entry for a typed message.
    pub fn of<T: RosMessage + Randomize>() -> Self {
        Self {
            type_name: T::TYPE_NAME,
            definition: T::definition(),
            decode: decode_dynamic::<T>,
            random: random_bytes::<T>,
        }
    }

    /// Parse the definition into a schema.
    pub fn schema(&self) -> Result<MessageSchema> {
        parse_schema(self.type_name, &self.definition)
    }
}

impl fmt::Debug for MessageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageEntry")
            .field("type_name", &self.type_name)
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

fn decode_dynamic<T: RosMessage>(data: &[u8]) -> Result<DecodedMessage> {
    T::from_bytes(data)?.to_dynamic()
}

fn random_bytes<T: RosMessage + Randomize>(seed: u64) -> Vec<u8> {
    random_instance::<T>(seed).to_bytes()
}

/// Registry of message types keyed by full type name.
pub struct MessageRegistry {
    entries: TypeRegistry<MessageEntry>,
}

impl MessageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: TypeRegistry::new(),
        }
    }

    /// Create a registry holding every built-in message type.
    pub fn with_builtin_messages() -> Result<Self> {
        let registry = Self::new();
        register_builtin_messages(&registry)?;
        Ok(registry)
    }

    /// Register a typed message. Returns `true` if an entry was replaced.
    pub fn register<T: RosMessage + Randomize>(&self) -> Result<bool> {
        let replaced = self.entries.register(T::TYPE_NAME, MessageEntry::of::<T>())?;
        if replaced {
            tracing::warn!(type_name = T::TYPE_NAME, "Replaced registered message type");
        }
        Ok(replaced)
    }

    /// Register both halves of a service.
    pub fn register_service<S>(&self) -> Result<()>
    where
        S: RosService,
        S::Request: Randomize,
        S::Response: Randomize,
    {
        self.register::<S::Request>()?;
        self.register::<S::Response>()?;
        tracing::debug!(service = S::TYPE_NAME, "Registered service messages");
        Ok(())
    }

    /// Look up an entry by full name, or by unique short name such as
    /// `Pose`.
    pub fn get(&self, type_name: &str) -> Result<Option<MessageEntry>> {
        if let Some(entry) = self.entries.get(type_name)? {
            return Ok(Some(entry));
        }
        if type_name.contains('/') {
            return Ok(None);
        }
        let suffix = format!("/{type_name}");
        let mut matches = self
            .entries
            .names()?
            .into_iter()
            .filter(|name| name.ends_with(&suffix));
        match (matches.next(), matches.next()) {
            (Some(name), None) => self.entries.get(&name),
            _ => Ok(None),
        }
    }

    /// Like [`MessageRegistry::get`], failing with
    /// [`CodecError::TypeNotFound`] when the name is unknown.
    pub fn entry(&self, type_name: &str) -> Result<MessageEntry> {
        self.get(type_name)?
            .ok_or_else(|| CodecError::type_not_found(type_name))
    }

    /// Schema for a registered type.
    pub fn schema(&self, type_name: &str) -> Result<MessageSchema> {
        self.entry(type_name)?.schema()
    }

    /// Decode bytes of a registered type.
    pub fn decode(&self, type_name: &str, data: &[u8]) -> Result<DecodedMessage> {
        (self.entry(type_name)?.decode)(data)
    }

    pub fn contains(&self, type_name: &str) -> Result<bool> {
        self.entries.contains(type_name)
    }

    /// All registered type names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        self.entries.names()
    }

    pub fn len(&self) -> Result<usize> {
        self.entries.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.entries.is_empty()
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register every built-in message and service type.
pub fn register_builtin_messages(registry: &MessageRegistry) -> Result<()> {
    registry.register::<std_msgs::Header>()?;
    registry.register::<std_msgs::Empty>()?;
    registry.register::<std_msgs::Bool>()?;
    registry.register::<std_msgs::Int32>()?;
    registry.register::<std_msgs::Float64>()?;
    registry.register::<std_msgs::String>()?;
    registry.register::<std_msgs::MultiArrayDimension>()?;
    registry.register::<std_msgs::MultiArrayLayout>()?;
    registry.register::<std_msgs::Float64MultiArray>()?;

    registry.register::<geometry_msgs::Point>()?;
    registry.register::<geometry_msgs::Quaternion>()?;
    registry.register::<geometry_msgs::Pose>()?;
    registry.register::<geometry_msgs::PoseStamped>()?;
    registry.register::<geometry_msgs::Vector3>()?;
    registry.register::<geometry_msgs::Twist>()?;

    registry.register::<sensor_msgs::JointState>()?;

    registry.register::<motion_msgs::CartesianPath>()?;
    registry.register_service::<motion_msgs::PlanCartesianPath>()?;
    Ok(())
}

static GLOBAL_REGISTRY: OnceLock<MessageRegistry> = OnceLock::new();

fn init_global_registry() -> MessageRegistry {
    let registry = MessageRegistry::new();
    if let Err(e) = register_builtin_messages(&registry) {
        tracing::warn!(error = %e, "Failed to register built-in messages");
    }
    registry
}

/// Process-wide registry of the built-in message types, built on first use.
pub fn global_registry() -> &'static MessageRegistry {
    GLOBAL_REGISTRY.get_or_init(init_global_registry)
}
