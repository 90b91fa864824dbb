//! Symbol table for type-aware analysis
//!
//! Collects the type aliases, interfaces, classes, enums and imports of one
//! file so type references resolve regardless of declaration order.

pub mod class_info;
pub mod symbol_table;

pub use class_info::{ClassInfo, ClassMemberInfo, InterfaceInfo, MemberKind};
pub use symbol_table::SymbolTable;
