pub const MAX_ATTACHMENTS: usize = 5;
pub const MAX_ATTACHMENT_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "svg"];

/// What the store needs to know about a picked file, kept separate from
/// `web_sys::File` so admission rules run in plain unit tests.
pub trait AttachmentSource {
    fn file_name(&self) -> String;
    fn media_type(&self) -> String;
    fn byte_size(&self) -> f64;
}

/// Issues and revokes preview handles (object URLs in the browser). Every
/// handle handed out by `acquire` is released exactly once.
pub trait PreviewRegistry<S> {
    fn acquire(&mut self, source: &S) -> String;
    fn release(&mut self, handle: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmissionNotice {
    CapacityFull,
    OversizedSkipped,
}

impl AdmissionNotice {
    pub fn message(&self) -> &'static str {
        match self {
            AdmissionNotice::CapacityFull => "You can upload up to 5 images.",
            AdmissionNotice::OversizedSkipped => "Some images exceed 5MB and were skipped.",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub accepted: usize,
    pub notice: Option<AdmissionNotice>,
}

pub struct AttachmentItem<S> {
    source: S,
    preview: String,
}

impl<S> AttachmentItem<S> {
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// Bounded, order-preserving image collection backing the contact form's
/// attachment strip. Preview handles live exactly as long as their item.
pub struct AttachmentStore<S, R: PreviewRegistry<S>> {
    items: Vec<AttachmentItem<S>>,
    registry: R,
}

impl<S, R: PreviewRegistry<S>> AttachmentStore<S, R> {
    pub fn new(registry: R) -> Self {
        Self { items: Vec::new(), registry }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at_capacity(&self) -> bool {
        self.items.len() >= MAX_ATTACHMENTS
    }

    pub fn items(&self) -> &[AttachmentItem<S>] {
        &self.items
    }

    pub fn sources(&self) -> Vec<S>
    where
        S: Clone,
    {
        self.items.iter().map(|item| item.source.clone()).collect()
    }

    /// Admits a picked batch. Non-images are dropped silently; a full store
    /// rejects the whole batch; otherwise files are taken in order up to the
    /// remaining capacity, skipping any single file over the size cap.
    pub fn add(&mut self, batch: Vec<S>) -> AddOutcome
    where
        S: AttachmentSource,
    {
        let images: Vec<S> = batch.into_iter().filter(|s| is_image(s)).collect();
        if images.is_empty() {
            return AddOutcome::default();
        }

        let remaining = MAX_ATTACHMENTS - self.items.len();
        if remaining == 0 {
            return AddOutcome { accepted: 0, notice: Some(AdmissionNotice::CapacityFull) };
        }

        let mut accepted = 0;
        let mut skipped_oversized = false;
        for source in images.into_iter().take(remaining) {
            if source.byte_size() > MAX_ATTACHMENT_BYTES {
                skipped_oversized = true;
                continue;
            }
            let preview = self.registry.acquire(&source);
            self.items.push(AttachmentItem { source, preview });
            accepted += 1;
        }

        AddOutcome {
            accepted,
            notice: skipped_oversized.then_some(AdmissionNotice::OversizedSkipped),
        }
    }

    /// Removes the item at `index`, releasing its preview handle. Out of
    /// range indexes are a no-op.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        let item = self.items.remove(index);
        self.registry.release(&item.preview);
        true
    }

    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.registry.release(&item.preview);
        }
    }
}

impl<S, R: PreviewRegistry<S>> Drop for AttachmentStore<S, R> {
    fn drop(&mut self) {
        self.clear();
    }
}

fn is_image(source: &impl AttachmentSource) -> bool {
    if source.media_type().starts_with("image/") {
        return true;
    }
    // Either prong admits: a misreported type still passes on extension.
    let name = source.file_name().to_lowercase();
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Clone)]
    struct TestImage {
        name: &'static str,
        kind: &'static str,
        bytes: f64,
    }

    impl TestImage {
        fn png(name: &'static str) -> Self {
            Self { name, kind: "image/png", bytes: 1024.0 }
        }

        fn sized(name: &'static str, bytes: f64) -> Self {
            Self { name, kind: "image/png", bytes }
        }
    }

    impl AttachmentSource for TestImage {
        fn file_name(&self) -> String {
            self.name.to_string()
        }

        fn media_type(&self) -> String {
            self.kind.to_string()
        }

        fn byte_size(&self) -> f64 {
            self.bytes
        }
    }

    #[derive(Clone, Default)]
    struct RegistryProbe(Rc<RefCell<ProbeState>>);

    #[derive(Default)]
    struct ProbeState {
        issued: usize,
        live: HashSet<String>,
    }

    impl RegistryProbe {
        fn live(&self) -> usize {
            self.0.borrow().live.len()
        }
    }

    impl PreviewRegistry<TestImage> for RegistryProbe {
        fn acquire(&mut self, _source: &TestImage) -> String {
            let mut state = self.0.borrow_mut();
            state.issued += 1;
            let handle = format!("preview-{}", state.issued);
            state.live.insert(handle.clone());
            handle
        }

        fn release(&mut self, handle: &str) {
            let mut state = self.0.borrow_mut();
            assert!(state.live.remove(handle), "handle released twice: {handle}");
        }
    }

    fn store() -> (AttachmentStore<TestImage, RegistryProbe>, RegistryProbe) {
        let probe = RegistryProbe::default();
        (AttachmentStore::new(probe.clone()), probe)
    }

    #[test]
    fn test_batch_add_stops_at_capacity() {
        let (mut store, _) = store();
        let batch = (0..7).map(|_| TestImage::png("a.png")).collect();
        let outcome = store.add(batch);
        assert_eq!(outcome.accepted, 5);
        assert_eq!(outcome.notice, None);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_full_store_rejects_batch_with_capacity_notice() {
        let (mut store, _) = store();
        store.add((0..5).map(|_| TestImage::png("a.png")).collect());
        let outcome = store.add(vec![TestImage::png("late.png")]);
        assert_eq!(outcome.accepted, 0);
        assert_eq!(outcome.notice, Some(AdmissionNotice::CapacityFull));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_non_images_are_dropped_silently() {
        let (mut store, _) = store();
        let outcome = store.add(vec![
            TestImage::png("ok.png"),
            TestImage { name: "notes.txt", kind: "text/plain", bytes: 10.0 },
        ]);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.notice, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_extension_admits_when_type_is_absent() {
        let (mut store, _) = store();
        let outcome = store.add(vec![
            TestImage { name: "shot.PNG", kind: "", bytes: 10.0 },
            TestImage { name: "tool.exe", kind: "", bytes: 10.0 },
        ]);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(store.items()[0].source().file_name(), "shot.PNG");
    }

    #[test]
    fn test_extension_admits_despite_non_image_declared_type() {
        let (mut store, _) = store();
        let outcome = store.add(vec![TestImage {
            name: "photo.png",
            kind: "application/octet-stream",
            bytes: 10.0,
        }]);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(store.items()[0].source().file_name(), "photo.png");
    }

    #[test]
    fn test_oversized_files_are_skipped_with_notice() {
        let (mut store, _) = store();
        let outcome = store.add(vec![
            TestImage::sized("small.png", 1024.0),
            TestImage::sized("huge.png", MAX_ATTACHMENT_BYTES + 1.0),
            TestImage::sized("medium.png", MAX_ATTACHMENT_BYTES),
        ]);
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.notice, Some(AdmissionNotice::OversizedSkipped));
        let names: Vec<String> = store.items().iter().map(|i| i.source().file_name()).collect();
        assert_eq!(names, vec!["small.png", "medium.png"]);
    }

    #[test]
    fn test_remove_is_positional_and_bounds_checked() {
        let (mut store, _) = store();
        store.add(vec![
            TestImage::png("a.png"),
            TestImage::png("b.png"),
            TestImage::png("c.png"),
        ]);
        assert!(!store.remove(10));
        assert!(store.remove(1));
        let names: Vec<String> = store.items().iter().map(|i| i.source().file_name()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
    }

    #[test]
    fn test_live_handles_always_match_collection_size() {
        let (mut store, probe) = store();
        store.add(vec![TestImage::png("a.png"), TestImage::png("b.png")]);
        assert_eq!(probe.live(), store.len());
        store.remove(0);
        assert_eq!(probe.live(), store.len());
        store.add(vec![TestImage::png("c.png")]);
        assert_eq!(probe.live(), store.len());
        store.clear();
        assert_eq!(probe.live(), 0);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_drop_releases_outstanding_handles() {
        let probe = RegistryProbe::default();
        {
            let mut store = AttachmentStore::new(probe.clone());
            store.add(vec![TestImage::png("a.png"), TestImage::png("b.png")]);
            assert_eq!(probe.live(), 2);
        }
        assert_eq!(probe.live(), 0);
    }
}
