//! Verificación sintáctica.
//!
//! La única condición validada a nivel del núcleo es el balance de los
//! marcadores de ciclo: un programa con conteos desiguales de `[` y `]`
//! se rechaza antes de invocar cualquier backend, sin producir artefacto
//! alguno. El balance no implica anidamiento correcto; `][` pasa esta
//! verificación. El modo [`SyntaxOptions::STRICT_NESTING`] cierra esa
//! brecha como un modo estricto documentado y opcional.

use crate::lex::{Scanner, Token};

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Opciones a aplicar durante la verificación sintáctica.
    pub struct SyntaxOptions: u32 {
        /// Exigir anidamiento correcto de ciclos, no solo balance.
        ///
        /// Con conteos iguales, un programa como `][` aún cierra un
        /// ciclo que nunca abrió. Esta opción rechaza ese `]` indicando
        /// su posición en bytes dentro del fuente.
        const STRICT_NESTING = 0x01;
    }
}

/// Un error de sintaxis en el programa fuente.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// Los conteos de `[` y `]` difieren.
    #[error("unmatched loop brackets: {open} `[` against {close} `]`")]
    Unbalanced { open: usize, close: usize },

    /// Un `]` no cierra ningún ciclo abierto.
    #[error("`]` at byte offset {0} closes no open loop")]
    DanglingClose(usize),
}

/// Verifica los marcadores de ciclo de un programa completo.
///
/// La verificación por omisión compara únicamente los conteos de `[` y
/// `]` en cualquier parte del fuente, sin atender su orden. Bajo
/// [`SyntaxOptions::STRICT_NESTING`] se realiza una segunda pasada que
/// exige que cada `]` cierre un ciclo efectivamente abierto.
pub fn check(source: &[u8], options: SyntaxOptions) -> Result<(), SyntaxError> {
    let (mut open, mut close) = (0, 0);
    for token in Scanner::new(source) {
        match token {
            Token::LoopOpen => open += 1,
            Token::LoopClose => close += 1,
            _ => (),
        }
    }

    if open != close {
        return Err(SyntaxError::Unbalanced { open, close });
    }

    if options.contains(SyntaxOptions::STRICT_NESTING) {
        // El balance ya garantiza que la profundidad termina en cero;
        // aquí solo puede fallar un `]` sin ciclo abierto.
        let mut depth = 0usize;
        for (offset, &byte) in source.iter().enumerate() {
            match Token::from_byte(byte) {
                Some(Token::LoopOpen) => depth += 1,
                Some(Token::LoopClose) if depth == 0 => {
                    return Err(SyntaxError::DanglingClose(offset));
                }
                Some(Token::LoopClose) => depth -= 1,
                _ => (),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_program_passes() {
        assert!(check(b"+++[>+<-]", SyntaxOptions::empty()).is_ok());
        assert!(check(b"", SyntaxOptions::empty()).is_ok());
    }

    #[test]
    fn unbalanced_program_fails() {
        match check(b"[[]", SyntaxOptions::empty()) {
            Err(SyntaxError::Unbalanced { open: 2, close: 1 }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn decoration_does_not_affect_the_count() {
        assert!(check(b"abre [ cuerpo + ] cierra", SyntaxOptions::empty()).is_ok());
    }

    #[test]
    fn reversed_brackets_pass_the_count_check() {
        assert!(check(b"][", SyntaxOptions::empty()).is_ok());
    }

    #[test]
    fn strict_mode_rejects_reversed_brackets() {
        match check(b"][", SyntaxOptions::STRICT_NESTING) {
            Err(SyntaxError::DanglingClose(0)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn strict_mode_reports_the_byte_offset() {
        match check(b"[+]x]y[", SyntaxOptions::STRICT_NESTING) {
            Err(SyntaxError::DanglingClose(4)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn strict_mode_accepts_proper_nesting() {
        assert!(check(b"[[>]<[.]]", SyntaxOptions::STRICT_NESTING).is_ok());
    }
}
