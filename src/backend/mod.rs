//! Dialectos objetivo de la traducción.
//!
//! Este módulo expone los tres dialectos de salida soportados y el
//! conjunto de primitivas de emisión que cada uno implementa. El
//! recorrido del programa fuente es común a todos y vive en
//! [`crate::codegen`]; aquí solo se define cómo se escribe cada
//! operación en el texto del objetivo. En general, debe utilizarse la
//! macro `dispatch_backend!()` para acceder a estas implementaciones.

use crate::codegen::{Context, Label};

use std::{
    io::{self, Write},
    str::FromStr,
};

/// Dialecto de salida.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Fuente C de alto nivel.
    C,

    /// Ensamblador x86 de 32 bits, sintaxis NASM.
    I386,

    /// Ensamblador MIPS32.
    Mips,
}

impl Backend {
    /// Nombre de artefacto por omisión para este dialecto.
    pub fn default_output(self) -> &'static str {
        match self {
            Backend::C => "out.c",
            Backend::I386 | Backend::Mips => "out.asm",
        }
    }
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "c" => Ok(Backend::C),
            "i386" => Ok(Backend::I386),
            "mips" => Ok(Backend::Mips),
            _ => Err(()),
        }
    }
}

mod c;
mod i386;
mod mips;

pub use c::Emitter as C;
pub use i386::Emitter as Intel386;
pub use mips::Emitter as Mips;

/// Primitivas de emisión para un dialecto objetivo.
///
/// Los tipos que implementan este trait traducen cada operación del
/// lenguaje fuente a su representación textual. El recorrido genérico
/// invoca exactamente una primitiva por operación plegada; el backend
/// no observa el flujo de tokens.
pub trait Emitter<'a, W: Write>: Sized {
    /// Avance del puntero de datos por celda, en las unidades de
    /// aritmética de punteros del objetivo.
    ///
    /// El recorrido genérico escala los conteos de movimiento por esta
    /// constante: un elemento para C, cuatro bytes por celda de 32 bits
    /// para los ensambladores.
    const PTR_STRIDE: u32;

    /// Construye el emisor a partir de un contexto de emisión.
    ///
    /// Además de construirse, el prólogo del artefacto (declaración de
    /// la cinta y del puntero de datos en su origen) debe emitirse aquí.
    fn new(cx: Context<'a, W>) -> io::Result<Self>;

    /// Obtiene el contexto de emisión.
    ///
    /// Implicado aquí que todo `Emitter` debe guardar as-is el
    /// [`Context`] que se le otorga en [`Emitter::new()`].
    fn cx(&mut self) -> &mut Context<'a, W>;

    /// Incrementa la celda actual `count` veces.
    fn add(&mut self, count: u32) -> io::Result<()>;

    /// Decrementa la celda actual `count` veces.
    fn sub(&mut self, count: u32) -> io::Result<()>;

    /// Avanza el puntero de datos; el conteo ya viene escalado por
    /// [`Emitter::PTR_STRIDE`].
    fn forward(&mut self, count: u32) -> io::Result<()>;

    /// Retrocede el puntero de datos; el conteo ya viene escalado por
    /// [`Emitter::PTR_STRIDE`].
    fn backward(&mut self, count: u32) -> io::Result<()>;

    /// Escribe la celda actual en la salida del programa emitido.
    fn output(&mut self) -> io::Result<()>;

    /// Lee un byte hacia la celda actual en el programa emitido.
    fn input(&mut self) -> io::Result<()>;

    /// Abre un ciclo: etiqueta de prueba y salida condicional cuando la
    /// celda actual vale cero.
    fn loop_open(&mut self, label: Label) -> io::Result<()>;

    /// Cierra un ciclo: salto incondicional de vuelta a la prueba,
    /// seguido de la etiqueta de fin del mismo ciclo.
    fn loop_close(&mut self, label: Label) -> io::Result<()>;

    /// Emite el epílogo y finaliza el listado.
    fn epilogue(self) -> io::Result<()>;
}
