//! Recorrido genérico de emisión.
//!
//! Los tres backends comparten el mismo ciclo de traducción: escanear el
//! programa fuente desde el inicio, plegar corridas de operadores
//! repetidos y administrar la pila de etiquetas de ciclo. Este módulo
//! implementa ese recorrido una única vez, parametrizado sobre el
//! conjunto de primitivas que cada backend aporta
//! ([`crate::backend::Emitter`]). El artefacto de salida se escribe de
//! forma incremental; nunca se retiene un búfer del código emitido.

use crate::{
    backend::{Backend, Emitter},
    lex::{Scanner, Token},
};

use std::io::{self, Write};

use thiserror::Error;

/// Número de celdas de la cinta de memoria declarada en cada artefacto.
///
/// Todos los objetivos declaran una cinta de esta capacidad fija,
/// inicializada en cero, con el puntero de datos en su origen.
pub const TAPE_CELLS: u32 = 30000;

/// Etiqueta numérica de ciclo, única dentro de una ejecución.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Label(pub u32);

/// Un error durante la emisión de código.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError {
    /// Error de E/S sobre el artefacto de salida.
    #[error("I/O error")]
    Io(#[from] io::Error),

    /// Un `]` intentó cerrar un ciclo cuando no había ninguno abierto.
    ///
    /// La verificación de balance no excluye programas como `][`; esta
    /// condición los detiene durante la emisión en vez de corromper la
    /// pila de etiquetas.
    #[error("`]` closes no open loop")]
    DanglingClose,
}

/// Estado de emisión compartido entre el recorrido genérico y el backend.
///
/// Contiene el artefacto de salida, la pila de etiquetas de ciclo con su
/// contador monótono y la profundidad de anidamiento. La pila crece sin
/// límite fijo: la profundidad de anidamiento la determina la entrada.
pub struct Context<'a, W> {
    output: &'a mut W,
    labels: Vec<Label>,
    next_label: u32,
    depth: u32,
}

impl<'a, W: Write> Context<'a, W> {
    fn new(output: &'a mut W) -> Self {
        Context {
            output,
            labels: Vec::new(),
            next_label: 0,
            // La profundidad 1 corresponde al cuerpo de `main` en el
            // objetivo C; los objetivos de ensamblador la ignoran.
            depth: 1,
        }
    }

    /// Obtiene el artefacto de salida.
    pub fn output(&mut self) -> &mut W {
        self.output
    }

    /// Escribe la indentación del nivel de anidamiento actual.
    pub fn put_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            write!(self.output, "\t")?;
        }

        Ok(())
    }

    /// Asigna una etiqueta fresca y la apila.
    ///
    /// El contador nunca se reinicia dentro de una ejecución, por lo
    /// cual ninguna etiqueta se reutiliza.
    fn enter_loop(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        self.labels.push(label);

        label
    }

    /// Desapila la etiqueta del ciclo abierto más reciente.
    fn leave_loop(&mut self) -> Option<Label> {
        self.labels.pop()
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth -= 1;
    }
}

/// Traduce un programa fuente completo a un dialecto objetivo.
///
/// El programa se escanea completo desde el inicio, sin importar si otro
/// backend ya lo recorrió: cada invocación es una pasada fresca e
/// independiente sobre el mismo fuente inmutable.
pub fn emit<W: Write>(source: &[u8], backend: Backend, output: &mut W) -> Result<(), EmitError> {
    dispatch_backend!(E: backend => translate::<E<W>, W>(source, output))
}

fn translate<'a, E, W>(source: &[u8], output: &'a mut W) -> Result<(), EmitError>
where
    W: Write,
    E: Emitter<'a, W>,
{
    let mut scanner = Scanner::new(source);

    // La construcción del emisor escribe el prólogo del artefacto
    let mut emitter = E::new(Context::new(output))?;

    while let Some(token) = scanner.next_token() {
        match token {
            Token::Increment => {
                let count = Scanner::fold(&mut scanner, token);
                emitter.add(count)?;
            }

            Token::Decrement => {
                let count = Scanner::fold(&mut scanner, token);
                emitter.sub(count)?;
            }

            // Los movimientos del puntero llegan al backend ya escalados
            // a sus unidades de aritmética de punteros
            Token::MoveRight => {
                let count = Scanner::fold(&mut scanner, token);
                emitter.forward(count * E::PTR_STRIDE)?;
            }

            Token::MoveLeft => {
                let count = Scanner::fold(&mut scanner, token);
                emitter.backward(count * E::PTR_STRIDE)?;
            }

            Token::Output => emitter.output()?,
            Token::Input => emitter.input()?,

            Token::LoopOpen => {
                let label = emitter.cx().enter_loop();
                emitter.loop_open(label)?;
                emitter.cx().indent();
            }

            Token::LoopClose => {
                let label = emitter.cx().leave_loop().ok_or(EmitError::DanglingClose)?;
                emitter.cx().dedent();
                emitter.loop_close(label)?;
            }
        }
    }

    emitter.epilogue()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate_to_string(source: &[u8], backend: Backend) -> String {
        let mut output = Vec::new();
        emit(source, backend, &mut output).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn decoration_never_changes_emitted_code() {
        for &backend in &[Backend::C, Backend::I386, Backend::Mips] {
            let plain = translate_to_string(b"+++[>+<-]", backend);
            let decorated = translate_to_string(b"tres: +++ (ciclo) [ > + < - ] fin", backend);

            assert_eq!(plain, decorated);
        }
    }

    #[test]
    fn folding_crosses_decoration() {
        let listing = translate_to_string(b"+++++ y tres mas +++", Backend::C);
        assert!(listing.contains("*pcell += 8;"));
    }

    #[test]
    fn labels_pair_and_are_never_reused() {
        let listing = translate_to_string(b"[[][]]", Backend::I386);

        for label in 0..3 {
            assert_eq!(listing.matches(&format!(".L{}:", label)).count(), 1);
            assert_eq!(listing.matches(&format!(".LE{}:", label)).count(), 1);
            assert_eq!(listing.matches(&format!("je      .LE{}\n", label)).count(), 1);
            assert_eq!(listing.matches(&format!("jmp     .L{}\n", label)).count(), 1);
        }

        assert!(!listing.contains(".L3:"));
    }

    #[test]
    fn pointer_runs_scale_by_cell_width_in_assembly() {
        let i386 = translate_to_string(b">>>>>", Backend::I386);
        assert!(i386.contains("add     ebx, 20"));
        assert!(!i386.contains("ebx, 5"));

        let mips = translate_to_string(b"<<<", Backend::Mips);
        assert!(mips.contains("addiu   $a1, $a1, -12"));
    }

    #[test]
    fn single_pointer_move_still_uses_the_byte_stride() {
        let listing = translate_to_string(b">", Backend::I386);
        assert!(listing.contains("add     ebx, 4"));
    }

    #[test]
    fn dangling_close_is_a_defined_error() {
        let mut output = Vec::new();
        match emit(b"][", Backend::Mips, &mut output) {
            Err(EmitError::DanglingClose) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
