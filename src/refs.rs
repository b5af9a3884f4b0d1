use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of indirect object the writer emits. Indices are font arena
/// indices or page positions.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub(crate) enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    FontDescriptor(usize),
    FontData(usize),
    ToUnicode(usize),
}

/// Hands out object ids in allocation order and remembers which object each belongs to
pub(crate) struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next: Ref,
}

impl ObjectReferences {
    pub(crate) fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next: Ref::new(1),
        }
    }

    pub(crate) fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Allocate a fresh id for `ref_type`
    pub(crate) fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.next.bump();
        self.refs.insert(ref_type, id);
        id
    }
}
