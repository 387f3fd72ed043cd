//! Macro utilitario para declarar steps tipados sin boilerplate.
//!
//! Exportado en la raíz del crate para poder usarlo como:
//!   use rail_core::typed_step;
//!
//! Formas soportadas:
//! - entrada simple, struct unitario:
//!   typed_step! { step Ferment { name: "ferment", input: Jug, output: Jug,
//!       run(me, jug, ctx) { ... } } }
//! - entrada tupla (cada slot se resuelve por separado desde memoria):
//!   typed_step! { step Label { name: "label", input: (Jug, Recipe), ... } }
//! - struct con fields y constructor posicional:
//!   typed_step! { step Age { name: "age", ..., fields { months: u32 }, ... } }
//!
//! El cuerpo de `run` evalúa a `StepResult<Output>`, así que `?` funciona
//! directo sobre errores de dominio. Usar un ident tipo `me`/`_me` para el
//! receptor (no el keyword `self`).

/// Declara un step tipado con derives e impl de `TypedStep`.
#[macro_export]
macro_rules! typed_step {
    // ---------------- Entrada tupla, struct unitario ----------------
    (
        step $name:ident {
            name: $id:expr,
            input: ($($ity:ty),+ $(,)?),
            output: $out:ty,
            run($self_ident:ident, ($($arg:ident),+ $(,)?), $ctx:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self { Self }
        }

        #[::async_trait::async_trait]
        impl $crate::step::TypedStep for $name {
            type Input = ($($ity,)+);
            type Output = $out;

            fn name(&self) -> &'static str { $id }

            async fn run(&self, input: Self::Input, $ctx: &$crate::step::StepContext)
                         -> $crate::step::StepResult<Self::Output> {
                let $self_ident = self;
                let ($($arg,)+) = input;
                $body
            }
        }
    };

    // ---------------- Entrada simple, struct con fields ----------------
    (
        step $name:ident {
            name: $id:expr,
            input: $inp:ty,
            output: $out:ty,
            fields { $($fname:ident : $fty:ty),+ $(,)? },
            run($self_ident:ident, $arg:ident, $ctx:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name { $(pub $fname: $fty),+ }

        impl $name {
            pub fn new($($fname: $fty),+) -> Self { Self { $($fname),+ } }
        }

        #[::async_trait::async_trait]
        impl $crate::step::TypedStep for $name {
            type Input = ($inp,);
            type Output = $out;

            fn name(&self) -> &'static str { $id }

            async fn run(&self, input: Self::Input, $ctx: &$crate::step::StepContext)
                         -> $crate::step::StepResult<Self::Output> {
                let $self_ident = self;
                let ($arg,) = input;
                $body
            }
        }
    };

    // ---------------- Entrada simple, struct unitario ----------------
    (
        step $name:ident {
            name: $id:expr,
            input: $inp:ty,
            output: $out:ty,
            run($self_ident:ident, $arg:ident, $ctx:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self { Self }
        }

        #[::async_trait::async_trait]
        impl $crate::step::TypedStep for $name {
            type Input = ($inp,);
            type Output = $out;

            fn name(&self) -> &'static str { $id }

            async fn run(&self, input: Self::Input, $ctx: &$crate::step::StepContext)
                         -> $crate::step::StepResult<Self::Output> {
                let $self_ident = self;
                let ($arg,) = input;
                $body
            }
        }
    };
}
