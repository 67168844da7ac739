//! Compilador cruzado de Brainfuck.
//!
//! # Front end
//! Cada programa deriva de un único archivo de código fuente. El archivo
//! se somete primero a una verificación sintáctica en [`syntax`], la cual
//! valida el balance de los marcadores de ciclo antes de emitir cualquier
//! artefacto. El análisis léxico en [`lex`] reduce el flujo de bytes a
//! tokens de operador, descartando en silencio todo byte decorativo, y
//! ofrece el plegado de corridas de operadores repetidos en pares
//! (operador, conteo). No se construye ningún árbol sintáctico ni
//! representación intermedia: el flujo de tokens es la única interfaz
//! entre fases.
//!
//! # Back end
//! La traducción ocurre en un único recorrido del programa fuente por
//! backend, implementado una sola vez en el módulo interno de generación
//! de código y parametrizado sobre el conjunto de primitivas de emisión
//! de cada dialecto objetivo: fuente C, ensamblador x86 de 32 bits o
//! ensamblador MIPS32. Cada backend escribe su artefacto de forma
//! incremental sobre cualquier [`std::io::Write`], operador por operador,
//! sin retener el código emitido en memoria.

#[macro_use]
mod macros;

pub mod lex;
pub mod syntax;

mod backend;
mod codegen;

/// Emisión de código.
///
/// Este módulo reexporta suficientes ítems internos relacionados a
/// generación de código para traducir un programa fuente completo a
/// alguno de los dialectos objetivo.
pub mod target {
    pub use crate::backend::Backend;
    pub use crate::codegen::{emit, EmitError, TAPE_CELLS};
}
