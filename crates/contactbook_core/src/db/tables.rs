//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Canonical contact rows (`ContactRow`, bincode-encoded).
pub const CONTACTS: TableDefinition<&str, &[u8]> = TableDefinition::new("contacts");
/// Unique email index: email -> contact id.
pub const CONTACTS_BY_EMAIL: TableDefinition<&str, &str> =
    TableDefinition::new("contacts_by_email");
