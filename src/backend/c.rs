//! Emisión de fuente C.
//!
//! El artefacto es una unidad de traducción completa: una cinta
//! `int cell[]` inicializada en cero, `main` como punto de entrada, una
//! secuencia de sentencias que refleja las operaciones plegadas y un
//! `return 0;` final. Los ciclos usan el `while` nativo del lenguaje,
//! por lo cual las etiquetas numéricas se ignoran; la indentación sigue
//! la profundidad de anidamiento.

use crate::codegen::{Context, Label, TAPE_CELLS};

use std::io::{self, Write};

/// Implementación de emisión para el objetivo C.
pub struct Emitter<'a, W> {
    cx: Context<'a, W>,
}

impl<'a, W: Write> super::Emitter<'a, W> for Emitter<'a, W> {
    // El puntero de datos es un `int *`; avanza por elementos
    const PTR_STRIDE: u32 = 1;

    fn new(mut cx: Context<'a, W>) -> io::Result<Self> {
        writeln!(cx.output(), "#include <stdio.h>")?;
        writeln!(cx.output())?;
        writeln!(cx.output(), "int main()")?;
        writeln!(cx.output(), "{{")?;
        stmt!(cx, "int cell[{}] = {{0}};", TAPE_CELLS)?;
        stmt!(cx, "int *pcell = cell;")?;
        writeln!(cx.output())?;

        Ok(Emitter { cx })
    }

    fn cx(&mut self) -> &mut Context<'a, W> {
        &mut self.cx
    }

    fn add(&mut self, count: u32) -> io::Result<()> {
        scaled!(
            count,
            stmt!(self.cx, "++*pcell;"),
            stmt!(self.cx, "*pcell += {};", count)
        )
    }

    fn sub(&mut self, count: u32) -> io::Result<()> {
        scaled!(
            count,
            stmt!(self.cx, "--*pcell;"),
            stmt!(self.cx, "*pcell -= {};", count)
        )
    }

    fn forward(&mut self, count: u32) -> io::Result<()> {
        scaled!(
            count,
            stmt!(self.cx, "++pcell;"),
            stmt!(self.cx, "pcell += {};", count)
        )
    }

    fn backward(&mut self, count: u32) -> io::Result<()> {
        scaled!(
            count,
            stmt!(self.cx, "--pcell;"),
            stmt!(self.cx, "pcell -= {};", count)
        )
    }

    fn output(&mut self) -> io::Result<()> {
        stmt!(self.cx, "putchar(*pcell);")
    }

    fn input(&mut self) -> io::Result<()> {
        stmt!(self.cx, "*pcell = getchar();")
    }

    fn loop_open(&mut self, _label: Label) -> io::Result<()> {
        stmt!(self.cx, "while (*pcell) {{")
    }

    fn loop_close(&mut self, _label: Label) -> io::Result<()> {
        stmt!(self.cx, "}}")
    }

    fn epilogue(mut self) -> io::Result<()> {
        writeln!(self.cx.output())?;
        stmt!(self.cx, "return 0;")?;
        writeln!(self.cx.output(), "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::{backend::Backend, codegen::emit};

    fn compile(source: &[u8]) -> String {
        let mut output = Vec::new();
        emit(source, Backend::C, &mut output).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn translates_a_complete_program() {
        let expected = "\
#include <stdio.h>

int main()
{
\tint cell[30000] = {0};
\tint *pcell = cell;

\t*pcell += 3;
\twhile (*pcell) {
\t\t++pcell;
\t\t++*pcell;
\t\t--pcell;
\t\t--*pcell;
\t}

\treturn 0;
}
";

        assert_eq!(compile(b"+++[>+<-]"), expected);
    }

    #[test]
    fn two_repetitions_stay_in_unit_form() {
        let listing = compile(b"++");

        assert_eq!(listing.matches("\t++*pcell;\n").count(), 2);
        assert!(!listing.contains("+="));
    }

    #[test]
    fn three_repetitions_collapse_to_one_statement() {
        let listing = compile(b"---");

        assert!(listing.contains("\t*pcell -= 3;\n"));
        assert!(!listing.contains("--*pcell;"));
    }

    #[test]
    fn io_uses_stdio_builtins() {
        let listing = compile(b".,");

        assert!(listing.contains("\tputchar(*pcell);\n"));
        assert!(listing.contains("\t*pcell = getchar();\n"));
    }

    #[test]
    fn indentation_tracks_loop_nesting() {
        let listing = compile(b"[[+]]");

        assert!(listing.contains(
            "\twhile (*pcell) {\n\t\twhile (*pcell) {\n\t\t\t++*pcell;\n\t\t}\n\t}\n"
        ));
    }
}
