use crate::domain::model::Course;

/// 預設桶數 (質數)
pub const DEFAULT_BUCKET_COUNT: usize = 211;

const FNV_OFFSET_BASIS: u64 = 2_166_136_261;
const FNV_PRIME: u64 = 16_777_619;

type Link = Option<Box<Node>>;

struct Node {
    course: Course,
    next: Link,
}

/// Course lookup table: a fixed number of buckets, each holding a singly
/// linked chain of courses keyed by `Course::id`.
///
/// The bucket count never changes after construction. New keys go to the
/// head of their chain; inserting an existing key replaces the stored
/// course in place.
pub struct CourseCatalog {
    buckets: Vec<Link>,
    len: usize,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::with_bucket_count(DEFAULT_BUCKET_COUNT)
    }

    /// A zero bucket count is bumped to one.
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        Self { buckets, len: 0 }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `course` under its id, replacing any course with the same id.
    pub fn insert(&mut self, course: Course) {
        debug_assert!(!course.id.is_empty(), "course id must not be empty");

        let slot = self.bucket_index(&course.id);

        let mut cursor = self.buckets[slot].as_deref_mut();
        while let Some(node) = cursor {
            if node.course.id == course.id {
                node.course = course;
                return;
            }
            cursor = node.next.as_deref_mut();
        }

        let next = self.buckets[slot].take();
        self.buckets[slot] = Some(Box::new(Node { course, next }));
        self.len += 1;
    }

    pub fn find(&self, id: &str) -> Option<&Course> {
        let mut cursor = self.buckets[self.bucket_index(id)].as_deref();
        while let Some(node) = cursor {
            if node.course.id == id {
                return Some(&node.course);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Visits every course in bucket order, then chain order. Callers that
    /// need a stable order sort afterwards.
    pub fn for_each<'a, F>(&'a self, mut visitor: F)
    where
        F: FnMut(&'a Course),
    {
        for course in self.iter() {
            visitor(course);
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }

    pub fn clear(&mut self) {
        // 逐節點釋放，避免長鏈在遞迴 drop 時爆堆疊
        for bucket in &mut self.buckets {
            let mut cursor = bucket.take();
            while let Some(mut node) = cursor {
                cursor = node.next.take();
            }
        }
        self.len = 0;
    }

    fn bucket_index(&self, id: &str) -> usize {
        (fnv1a(id) % self.buckets.len() as u64) as usize
    }
}

fn fnv1a(key: &str) -> u64 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CourseCatalog {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for CourseCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseCatalog")
            .field("bucket_count", &self.buckets.len())
            .field("len", &self.len)
            .finish()
    }
}

impl Extend<Course> for CourseCatalog {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseCatalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}

pub struct Iter<'a> {
    buckets: std::slice::Iter<'a, Link>,
    chain: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain {
                self.chain = node.next.as_deref();
                return Some(&node.course);
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }
}

impl<'a> IntoIterator for &'a CourseCatalog {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
