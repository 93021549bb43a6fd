use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// A `Vec` that can only be indexed by the typed index `I`.
pub struct IndexedVec<I, T> {
    vec: Vec<T>,
    _marker: PhantomData<I>,
}

impl<I, T> Deref for IndexedVec<I, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<I, T> DerefMut for IndexedVec<I, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vec
    }
}

impl<I: AsIndex, T> IndexedVec<I, T> {
    pub fn indexes(&self) -> impl Iterator<Item = I> + DoubleEndedIterator + ExactSizeIterator {
        (0..self.vec.len()).map(I::from_usize)
    }

    pub fn enumerate_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.vec.iter_mut().enumerate().map(|(i, t)| (I::from_usize(i), t))
    }
}

impl<I: AsIndex, T: Clone> IndexedVec<I, T> {
    pub fn from_elem(elem: T, len: usize) -> Self {
        vec![elem; len].into()
    }
}

impl<I, T: Clone> Clone for IndexedVec<I, T> {
    fn clone(&self) -> Self {
        self.vec.clone().into()
    }
}

impl<I, T: fmt::Debug> fmt::Debug for IndexedVec<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.vec.fmt(f)
    }
}

impl<I: AsIndex, T> Index<I> for IndexedVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.vec[index.to_usize()]
    }
}

impl<I: AsIndex, T> IndexMut<I> for IndexedVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.vec[index.to_usize()]
    }
}

impl<I, T> From<Vec<T>> for IndexedVec<I, T> {
    fn from(value: Vec<T>) -> Self {
        Self { vec: value, _marker: PhantomData }
    }
}

impl<I, T> FromIterator<T> for IndexedVec<I, T> {
    fn from_iter<IT: IntoIterator<Item = T>>(iter: IT) -> Self {
        Vec::from_iter(iter).into()
    }
}

pub trait AsIndex: Copy {
    fn to_usize(&self) -> usize;
    fn from_usize(index: usize) -> Self;
}

/// A `usize` that is never `usize::MAX`, so `Option` of an index stays one word.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonMaxUsize(NonZeroUsize);

impl NonMaxUsize {
    pub const fn new(n: usize) -> Self {
        match NonZeroUsize::new(n.wrapping_add(1)) {
            Some(n) => Self(n),
            None => panic!("index out of range"),
        }
    }

    pub const fn to_usize(self) -> usize {
        self.0.get() - 1
    }
}

impl Default for NonMaxUsize {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for NonMaxUsize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_usize().fmt(f)
    }
}

#[macro_export]
macro_rules! new_index {
    ($(#[$($meta:tt)*])* $vis:vis index $ty:ident) => {
        $(#[$($meta)*])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $ty { index: $crate::index::NonMaxUsize }

        #[allow(non_snake_case, dead_code)]
        $vis const fn $ty(index: usize) -> $ty {
            $ty { index: $crate::index::NonMaxUsize::new(index) }
        }

        impl $crate::index::AsIndex for $ty {
            fn to_usize(&self) -> usize {
                self.index.to_usize()
            }

            fn from_usize(index: usize) -> Self {
                $ty(index)
            }
        }

        impl ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($ty), self.index.to_usize())
            }
        }
    };
}
