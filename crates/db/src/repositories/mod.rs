//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod relatorio_repo;
pub mod unidade_repo;
pub mod usuario_repo;

pub use relatorio_repo::RelatorioRepo;
pub use unidade_repo::{UnidadeRepo, UniqueField};
pub use usuario_repo::UsuarioRepo;
