use crate::types::ObjectId;

/// Hands out ObjectIds in increasing order.
///
/// Ids are never recycled while the generator lives. After loading saved
/// objects, [`ObjectIdGenerator::observe`] each one so new ids start past
/// them.
#[derive(Clone, Debug, Default)]
pub struct ObjectIdGenerator {
    next: u32,
}

impl ObjectIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Makes sure `id` will not be generated again
    pub fn observe(&mut self, id: ObjectId) {
        if id.value() >= self.next {
            self.next = id.value().wrapping_add(1);
        }
    }

    /// The id the next call to `generate` returns
    pub fn peek(&self) -> ObjectId {
        ObjectId::new(self.next)
    }
}
