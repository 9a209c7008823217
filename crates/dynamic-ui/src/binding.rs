//! Type-erased connections between a widget and its backend.
use std::{
    any::{Any, TypeId},
    sync::Arc,
};

use futures::{stream::BoxStream, Stream, StreamExt};

/// A runtime stand-in for a type.
#[derive(Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    pub fn of<T: 'static>() -> Self {
        TypeToken {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl std::hash::Hash for TypeToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl std::fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

impl std::fmt::Display for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// A function a backend calls to deliver values out of a widget.
pub type Output<T> = Arc<dyn Fn(T) + Send + Sync>;

/// The channel pair connecting a widget to whatever backend renders it.
///
/// The input half is a stream of values the backend should display. The
/// output half is a function the backend calls when the user produces a
/// value. Both types are erased, so widgets of every kind fit in one tree,
/// and recovered with [`Binding::into_parts`].
pub struct Binding {
    input_type: TypeToken,
    output_type: TypeToken,
    input: Box<dyn Any + Send>,
    output: Box<dyn Any + Send>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("input_type", &self.input_type)
            .field("output_type", &self.output_type)
            .finish()
    }
}

impl Binding {
    /// Bind an input stream and an output function.
    pub fn new<I, O, St, F>(input: St, output: F) -> Self
    where
        I: Send + 'static,
        O: 'static,
        St: Stream<Item = I> + Send + 'static,
        F: Fn(O) + Send + Sync + 'static,
    {
        let input: BoxStream<'static, I> = input.boxed();
        let output: Output<O> = Arc::new(output);
        Binding {
            input_type: TypeToken::of::<I>(),
            output_type: TypeToken::of::<O>(),
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// The type of values flowing into the widget.
    pub fn input_type(&self) -> TypeToken {
        self.input_type
    }

    /// The type of values flowing out of the widget.
    pub fn output_type(&self) -> TypeToken {
        self.output_type
    }

    /// Whether this binding carries `I` in and `O` out.
    pub fn binds<I: 'static, O: 'static>(&self) -> bool {
        self.input_type == TypeToken::of::<I>() && self.output_type == TypeToken::of::<O>()
    }

    /// Recover the typed halves.
    ///
    /// On a type mismatch the binding is handed back untouched.
    pub fn into_parts<I, O>(self) -> Result<(BoxStream<'static, I>, Output<O>), Binding>
    where
        I: Send + 'static,
        O: 'static,
    {
        if !self.binds::<I, O>() {
            return Err(self);
        }
        let Binding {
            input_type,
            output_type,
            input,
            output,
        } = self;
        let input = match input.downcast::<BoxStream<'static, I>>() {
            Ok(input) => *input,
            Err(input) => {
                return Err(Binding {
                    input_type,
                    output_type,
                    input,
                    output,
                })
            }
        };
        match output.downcast::<Output<O>>() {
            Ok(output) => Ok((input, *output)),
            Err(output) => Err(Binding {
                input_type,
                output_type,
                input: Box::new(input),
                output,
            }),
        }
    }
}
