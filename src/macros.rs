macro_rules! dispatch_backend {
    ($type:ident: $backend:expr => $expr:expr) => {{
        use crate::backend::{Backend, Intel386, Mips, C};

        match $backend {
            Backend::C => {
                type $type<'out, W> = C<'out, W>;
                $expr
            }

            Backend::I386 => {
                type $type<'out, W> = Intel386<'out, W>;
                $expr
            }

            Backend::Mips => {
                type $type<'out, W> = Mips<'out, W>;
                $expr
            }
        }
    }};
}

macro_rules! emit {
    ($context:expr, $opcode:expr) => {
        writeln!($context.output(), "\t{}", $opcode)
    };

    ($context:expr, $opcode:expr, $($format:tt)*) => {{
        write!($context.output(), "\t{:8}", $opcode)?;
        writeln!($context.output(), $($format)*)
    }};
}

macro_rules! stmt {
    ($context:expr, $($format:tt)*) => {{
        $context.put_indent()?;
        writeln!($context.output(), $($format)*)
    }};
}

// Umbral de plegado: una repetición emite la forma unitaria, dos la
// emiten dos veces, tres o más emiten una sola instrucción
// parametrizada por el conteo literal.
macro_rules! scaled {
    ($count:expr, $unit:expr, $scaled:expr) => {{
        match $count {
            1 => $unit,
            2 => {
                $unit?;
                $unit
            }
            _ => $scaled,
        }
    }};
}
