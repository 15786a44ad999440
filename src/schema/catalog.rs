// src/schema/catalog.rs

//! The built-in demo schemas.
//!
//! ```yaml
//! title: Example config
//! owner:
//!   name: matt price
//!   dob: 1901-01-01T00:00:00
//! database:
//!   server: 192.168.1.1
//!   ports: [8001, 8002]
//!   connection_max: 5000
//!   enabled: true
//! servers:
//!   alpha: { ip: 10.0.0.1, dc: eqdc10 }
//!   beta: { ip: 10.0.0.2, dc: eqdc10 }
//! clients:
//!   data: [[gamma, delta], [1, 2]]
//!   hosts: [alpha, omega]
//! logs:
//!   save: true
//!   path: ./logs/run.json
//! ```

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::schema::checks::{known_host, name_has_space, path_does_not_exist, port_in_range};
use crate::schema::{Field, Kind, Schema};

pub fn owner() -> Schema {
    Schema::new("Owner")
        .field(Field::new("name", Kind::Str).check(name_has_space))
        .field(Field::new("dob", Kind::DateTime))
}

pub fn database() -> Schema {
    Schema::new("Database")
        .field(Field::new("server", Kind::Ipv4))
        .field(
            Field::new("ports", Kind::wrapped_list_of(Kind::Integer)).check_each(port_in_range),
        )
        .field(Field::new("connection_max", Kind::Float))
        .field(Field::new("enabled", Kind::Bool).with_default(false))
}

pub fn server_entry() -> Schema {
    Schema::new("ServerEntry")
        .field(Field::new("ip", Kind::Ipv4))
        .field(Field::new("dc", Kind::Str))
}

pub fn servers() -> Schema {
    Schema::new("Servers")
        .field(Field::new("alpha", Kind::nested(server_entry())))
        .field(Field::new("beta", Kind::nested(server_entry())))
}

pub fn clients() -> Schema {
    Schema::new("Clients")
        .field(Field::new(
            "data",
            Kind::list_of(Kind::list_of(Kind::AnyOf(vec![Kind::Str, Kind::Integer]))),
        ))
        .field(Field::new("hosts", Kind::wrapped_list_of(Kind::Str)).check_each(known_host))
}

pub fn logs() -> Schema {
    Schema::new("Logs")
        .field(Field::new("save", Kind::Bool).with_default(false))
        .field(Field::new("path", Kind::Path).check(path_does_not_exist))
}

pub fn config() -> Schema {
    Schema::new("Config")
        .field(Field::new("title", Kind::Str))
        .field(Field::new("owner", Kind::nested(owner())))
        .field(Field::new("database", Kind::nested(database())))
        .field(Field::new("servers", Kind::nested(servers())))
        .field(Field::new("clients", Kind::nested(clients())))
        .field(Field::new("logs", Kind::nested(logs())))
}

/// Selector for the built-in schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaName {
    Owner,
    Database,
    ServerEntry,
    Servers,
    Clients,
    Logs,
    Config,
}

impl SchemaName {
    pub const ALL: [SchemaName; 7] = [
        SchemaName::Owner,
        SchemaName::Database,
        SchemaName::ServerEntry,
        SchemaName::Servers,
        SchemaName::Clients,
        SchemaName::Logs,
        SchemaName::Config,
    ];

    pub fn schema(self) -> Schema {
        match self {
            SchemaName::Owner => owner(),
            SchemaName::Database => database(),
            SchemaName::ServerEntry => server_entry(),
            SchemaName::Servers => servers(),
            SchemaName::Clients => clients(),
            SchemaName::Logs => logs(),
            SchemaName::Config => config(),
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().name())
    }
}

impl FromStr for SchemaName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_' && *c != '-').collect();
        SchemaName::ALL
            .into_iter()
            .find(|name| name.schema().name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown schema: {s}"))
    }
}
