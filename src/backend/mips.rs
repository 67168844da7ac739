//! Emisión de ensamblador MIPS32.
//!
//! `$a1` mantiene el puntero de datos; las celdas son palabras de 32
//! bits y la aritmética del puntero es por bytes. La celda actual se
//! carga a `$t0` para operar y se escribe de vuelta. La E/S y la
//! terminación usan los números de syscall fijos del entorno: 11
//! imprime un carácter, 12 lee uno y 10 termina el programa.

use crate::codegen::{Context, Label, TAPE_CELLS};

use std::io::{self, Write};

/// Implementación de emisión para MIPS32.
pub struct Emitter<'a, W> {
    cx: Context<'a, W>,
}

impl<'a, W: Write> super::Emitter<'a, W> for Emitter<'a, W> {
    // Celdas de 32 bits; la aritmética de `$a1` es por bytes
    const PTR_STRIDE: u32 = 4;

    fn new(mut cx: Context<'a, W>) -> io::Result<Self> {
        writeln!(cx.output(), ".data")?;
        writeln!(cx.output(), "\tcell: .word 0:{}", TAPE_CELLS)?;
        writeln!(cx.output(), ".text")?;
        writeln!(cx.output(), "main:")?;
        emit!(cx, "la", "$a1, cell")?;

        Ok(Emitter { cx })
    }

    fn cx(&mut self) -> &mut Context<'a, W> {
        &mut self.cx
    }

    // Este objetivo no pliega por umbral: toda corrida emite una sola
    // secuencia carga-opera-almacena con el conteo literal

    fn add(&mut self, count: u32) -> io::Result<()> {
        emit!(self.cx, "lw", "$t0, ($a1)")?;
        emit!(self.cx, "addi", "$t0, $t0, {}", count)?;
        emit!(self.cx, "sw", "$t0, ($a1)")
    }

    fn sub(&mut self, count: u32) -> io::Result<()> {
        emit!(self.cx, "lw", "$t0, ($a1)")?;
        emit!(self.cx, "addiu", "$t0, $t0, -{}", count)?;
        emit!(self.cx, "sw", "$t0, ($a1)")
    }

    fn forward(&mut self, count: u32) -> io::Result<()> {
        emit!(self.cx, "addi", "$a1, $a1, {}", count)
    }

    fn backward(&mut self, count: u32) -> io::Result<()> {
        emit!(self.cx, "addiu", "$a1, $a1, -{}", count)
    }

    fn output(&mut self) -> io::Result<()> {
        emit!(self.cx, "li", "$v0, 11")?;
        emit!(self.cx, "lw", "$a0, ($a1)")?;
        emit!(self.cx, "syscall")
    }

    fn input(&mut self) -> io::Result<()> {
        emit!(self.cx, "li", "$v0, 12")?;
        emit!(self.cx, "syscall")?;
        emit!(self.cx, "sw", "$v0, ($a1)")
    }

    fn loop_open(&mut self, label: Label) -> io::Result<()> {
        let Label(label) = label;

        writeln!(self.cx.output(), "L{}:", label)?;
        emit!(self.cx, "lw", "$t0, ($a1)")?;
        emit!(self.cx, "beq", "$t0, $zero, LE{}", label)
    }

    fn loop_close(&mut self, label: Label) -> io::Result<()> {
        let Label(label) = label;

        emit!(self.cx, "j", "L{}", label)?;
        writeln!(self.cx.output(), "LE{}:", label)
    }

    fn epilogue(mut self) -> io::Result<()> {
        // Syscall 10: terminación del programa
        emit!(self.cx, "li", "$v0, 10")?;
        emit!(self.cx, "syscall")?;
        writeln!(self.cx.output())
    }
}

#[cfg(test)]
mod tests {
    use crate::{backend::Backend, codegen::emit};

    fn compile(source: &[u8]) -> String {
        let mut output = Vec::new();
        emit(source, Backend::Mips, &mut output).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn declares_tape_and_exits_through_syscall() {
        let listing = compile(b"");

        assert!(listing.starts_with(".data\n\tcell: .word 0:30000\n.text\nmain:\n"));
        assert!(listing.contains("\tla      $a1, cell\n"));
        assert!(listing.ends_with("\tli      $v0, 10\n\tsyscall\n\n"));
    }

    #[test]
    fn cell_arithmetic_always_loads_and_stores() {
        let one = compile(b"+");
        assert!(one.contains("\tlw      $t0, ($a1)\n\taddi    $t0, $t0, 1\n\tsw      $t0, ($a1)\n"));

        let many = compile(b"---");
        assert!(many.contains("\taddiu   $t0, $t0, -3\n"));
    }

    #[test]
    fn io_uses_fixed_syscall_numbers() {
        let listing = compile(b".,");

        assert!(listing.contains("\tli      $v0, 11\n\tlw      $a0, ($a1)\n\tsyscall\n"));
        assert!(listing.contains("\tli      $v0, 12\n\tsyscall\n\tsw      $v0, ($a1)\n"));
    }

    #[test]
    fn loops_use_numbered_branch_labels() {
        let listing = compile(b"[.]");

        assert!(listing.contains("L0:\n\tlw      $t0, ($a1)\n\tbeq     $t0, $zero, LE0\n"));
        assert!(listing.contains("\tj       L0\nLE0:\n"));
    }
}
