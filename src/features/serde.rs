use core::{
    fmt::{self, Display},
    marker::PhantomData,
};

use serde::{
    Deserialize, Serialize,
    de::{self, Visitor},
};

use crate::{BitVec, SlotVec, alloc::AllocError, alloc::VecAllocator};

struct AllocationFailed;

impl Display for AllocationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("allocation failed")
    }
}

fn map_alloc_error<E: de::Error>(result: Result<(), AllocError>) -> Result<(), E> {
    match result {
        Ok(()) => Ok(()),
        Err(AllocError) => Err(E::custom(&AllocationFailed)),
    }
}

impl<T: Serialize, A: VecAllocator> Serialize for SlotVec<T, A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        <[T]>::serialize(self, serializer)
    }
}

impl<A: VecAllocator> Serialize for BitVec<A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>, A: VecAllocator + Default> Deserialize<'de> for SlotVec<T, A> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SlotVecVisitor<T, A: VecAllocator>(PhantomData<SlotVec<T, A>>);

        impl<'de, T: Deserialize<'de>, A: VecAllocator + Default> Visitor<'de> for SlotVecVisitor<T, A> {
            type Value = SlotVec<T, A>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array")
            }

            fn visit_seq<Seq>(self, mut seq: Seq) -> Result<Self::Value, Seq::Error>
            where
                Seq: serde::de::SeqAccess<'de>,
            {
                let mut vec = SlotVec::new_in(A::default());

                if let Some(size_hint) = seq.size_hint() {
                    map_alloc_error(vec.try_reserve(size_hint))?;
                }

                while let Some(elem) = seq.next_element()? {
                    map_alloc_error(vec.try_push(elem))?;
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(SlotVecVisitor(PhantomData))
    }
}

impl<'de, A: VecAllocator + Default> Deserialize<'de> for BitVec<A> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BitVecVisitor<A: VecAllocator>(PhantomData<BitVec<A>>);

        impl<'de, A: VecAllocator + Default> Visitor<'de> for BitVecVisitor<A> {
            type Value = BitVec<A>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of booleans")
            }

            fn visit_seq<Seq>(self, mut seq: Seq) -> Result<Self::Value, Seq::Error>
            where
                Seq: serde::de::SeqAccess<'de>,
            {
                let mut bits = BitVec::new_in(A::default());

                if let Some(size_hint) = seq.size_hint() {
                    map_alloc_error(bits.try_reserve(size_hint))?;
                }

                while let Some(bit) = seq.next_element()? {
                    map_alloc_error(bits.try_push(bit))?;
                }

                Ok(bits)
            }
        }

        deserializer.deserialize_seq(BitVecVisitor(PhantomData))
    }
}
