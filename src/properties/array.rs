use super::values::{ElementType, PropertyData, PropertyValues};

/// Full-domain backing array for one property, addressed by point id
#[derive(Debug, Clone)]
pub(super) struct PropertyArray {
    data: PropertyData,
    components: usize,
}

impl PropertyArray {
    /// Zero-filled array covering `n_points` points
    pub(super) fn zeros(n_points: usize, element_type: ElementType, components: usize) -> Self {
        let len = n_points * components;
        let data = match element_type {
            ElementType::Float => PropertyData::Float(vec![0.0; len]),
            ElementType::Int => PropertyData::Int(vec![0; len]),
        };
        Self { data, components }
    }

    pub(super) fn element_type(&self) -> ElementType {
        match self.data {
            PropertyData::Float(_) => ElementType::Float,
            PropertyData::Int(_) => ElementType::Int,
        }
    }

    pub(super) fn components(&self) -> usize {
        self.components
    }

    /// Number of points (not elements) covered
    pub(super) fn n_points(&self) -> usize {
        let len = match &self.data {
            PropertyData::Float(v) => v.len(),
            PropertyData::Int(v) => v.len(),
        };
        len / self.components
    }

    /// Write `values` into the positions given by `ids`
    ///
    /// Caller guarantees matching element type, component count and length.
    pub(super) fn scatter(&mut self, ids: &[usize], values: &PropertyValues) {
        let c = self.components;
        match (&mut self.data, values.data()) {
            (PropertyData::Float(dst), PropertyData::Float(src)) => scatter_into(dst, src, ids, c),
            (PropertyData::Int(dst), PropertyData::Int(src)) => scatter_into(dst, src, ids, c),
            _ => unreachable!("element type checked by the store"),
        }
    }

    /// Collect the values at `ids`, in the order given
    pub(super) fn gather(&self, ids: &[usize]) -> PropertyValues {
        let c = self.components;
        let data = match &self.data {
            PropertyData::Float(src) => PropertyData::Float(gather_from(src, ids, c)),
            PropertyData::Int(src) => PropertyData::Int(gather_from(src, ids, c)),
        };
        PropertyValues::from_parts(data, c)
    }
}

fn scatter_into<T: Copy>(dst: &mut [T], src: &[T], ids: &[usize], c: usize) {
    for (chunk, &id) in src.chunks_exact(c).zip(ids) {
        dst[id * c..(id + 1) * c].copy_from_slice(chunk);
    }
}

fn gather_from<T: Copy>(src: &[T], ids: &[usize], c: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(ids.len() * c);
    for &id in ids {
        out.extend_from_slice(&src[id * c..(id + 1) * c]);
    }
    out
}
