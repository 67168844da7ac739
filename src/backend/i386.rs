//! Emisión de ensamblador x86 de 32 bits, sintaxis NASM.
//!
//! `ebx` mantiene el puntero de datos durante todo el programa; las
//! celdas son `dword` y la aritmética del puntero es por bytes. La E/S
//! delega en `putchar`/`getchar` externos por convención de llamada: el
//! argumento se deposita en `[esp]` dentro del frame creado por el
//! prólogo.

use crate::codegen::{Context, Label, TAPE_CELLS};

use std::io::{self, Write};

/// Implementación de emisión para x86 de 32 bits.
pub struct Emitter<'a, W> {
    cx: Context<'a, W>,
}

impl<'a, W: Write> super::Emitter<'a, W> for Emitter<'a, W> {
    // Celdas de 32 bits; la aritmética de `ebx` es por bytes
    const PTR_STRIDE: u32 = 4;

    fn new(mut cx: Context<'a, W>) -> io::Result<Self> {
        writeln!(cx.output(), "SECTION .data")?;
        writeln!(cx.output(), "\tcell: times {} dd 0", TAPE_CELLS)?;
        writeln!(cx.output())?;
        writeln!(cx.output(), "extern putchar")?;
        writeln!(cx.output(), "extern getchar")?;
        writeln!(cx.output())?;
        writeln!(cx.output(), "SECTION .text")?;
        writeln!(cx.output(), "global main")?;
        writeln!(cx.output(), "main:")?;

        // Prólogo: frame de llamada y puntero de datos al origen de la cinta
        emit!(cx, "push", "ebp")?;
        emit!(cx, "mov", "ebp, esp")?;
        emit!(cx, "mov", "ebx, cell")?;

        Ok(Emitter { cx })
    }

    fn cx(&mut self) -> &mut Context<'a, W> {
        &mut self.cx
    }

    fn add(&mut self, count: u32) -> io::Result<()> {
        scaled!(
            count,
            emit!(self.cx, "inc", "dword [ebx]"),
            emit!(self.cx, "add", "dword [ebx], {}", count)
        )
    }

    fn sub(&mut self, count: u32) -> io::Result<()> {
        scaled!(
            count,
            emit!(self.cx, "dec", "dword [ebx]"),
            emit!(self.cx, "sub", "dword [ebx], {}", count)
        )
    }

    fn forward(&mut self, count: u32) -> io::Result<()> {
        // Siempre una sola instrucción con el total en bytes
        emit!(self.cx, "add", "ebx, {}", count)
    }

    fn backward(&mut self, count: u32) -> io::Result<()> {
        emit!(self.cx, "sub", "ebx, {}", count)
    }

    fn output(&mut self) -> io::Result<()> {
        emit!(self.cx, "mov", "eax, dword [ebx]")?;
        emit!(self.cx, "mov", "dword [esp], eax")?;
        emit!(self.cx, "call", "putchar")
    }

    fn input(&mut self) -> io::Result<()> {
        emit!(self.cx, "call", "getchar")?;
        emit!(self.cx, "mov", "dword [ebx], eax")
    }

    fn loop_open(&mut self, label: Label) -> io::Result<()> {
        let Label(label) = label;

        writeln!(self.cx.output(), ".L{}:", label)?;
        emit!(self.cx, "cmp", "dword [ebx], 0")?;
        emit!(self.cx, "je", ".LE{}", label)
    }

    fn loop_close(&mut self, label: Label) -> io::Result<()> {
        let Label(label) = label;

        emit!(self.cx, "jmp", ".L{}", label)?;
        writeln!(self.cx.output(), ".LE{}:", label)
    }

    fn epilogue(mut self) -> io::Result<()> {
        emit!(self.cx, "leave")?;
        emit!(self.cx, "ret")
    }
}
