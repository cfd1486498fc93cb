//! Structural comparison of two canonical trees.
//!
//! The core entry point is [`compare`], which walks both trees in lockstep
//! with an explicit stack and records divergences in depth-first order.

use crate::canonical::{CanonId, CanonNode, CanonicalTree};
use crate::diff::model::{DiffPath, DiffResult, Divergence, DivergenceKind, PathSegment};

/// Parent-linked path storage; a path is materialized only when a divergence
/// is recorded.
struct Trail {
    parent: Option<usize>,
    segment: PathSegment,
}

enum Pending {
    Pair {
        expected: CanonId,
        actual: CanonId,
        trail: Option<usize>,
    },
    Missing {
        expected: CanonId,
        trail: Option<usize>,
    },
    Unexpected {
        actual: CanonId,
        trail: Option<usize>,
    },
}

/// Position in a merge of two label-sorted child lists.
enum Merged {
    Both(usize, usize),
    ExpectedOnly(usize),
    ActualOnly(usize),
}

/// Merge two lists sorted by label. Equal labels pair up positionally.
fn merge_sorted(expected: &[&str], actual: &[&str]) -> Vec<Merged> {
    let mut out = Vec::with_capacity(expected.len().max(actual.len()));
    let (mut i, mut j) = (0, 0);
    while i < expected.len() && j < actual.len() {
        match expected[i].cmp(actual[j]) {
            std::cmp::Ordering::Equal => {
                out.push(Merged::Both(i, j));
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                out.push(Merged::ExpectedOnly(i));
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(Merged::ActualOnly(j));
                j += 1;
            }
        }
    }
    out.extend((i..expected.len()).map(Merged::ExpectedOnly));
    out.extend((j..actual.len()).map(Merged::ActualOnly));
    out
}

struct Comparator<'t> {
    expected: &'t CanonicalTree,
    actual: &'t CanonicalTree,
    trails: Vec<Trail>,
    stack: Vec<Pending>,
    divergences: Vec<Divergence>,
    limit: usize,
}

impl<'t> Comparator<'t> {
    fn child(&mut self, parent: Option<usize>, segment: PathSegment) -> Option<usize> {
        self.trails.push(Trail { parent, segment });
        Some(self.trails.len() - 1)
    }

    fn path(&self, trail: Option<usize>) -> DiffPath {
        let mut segments = Vec::new();
        let mut cursor = trail;
        while let Some(idx) = cursor {
            let t = &self.trails[idx];
            segments.push(t.segment.clone());
            cursor = t.parent;
        }
        segments.reverse();
        DiffPath(segments)
    }

    fn record(
        &mut self,
        trail: Option<usize>,
        kind: DivergenceKind,
        expected: Option<CanonId>,
        actual: Option<CanonId>,
    ) {
        let divergence = Divergence {
            path: self.path(trail),
            kind,
            expected: expected.map(|id| self.expected.to_json(id)),
            actual: actual.map(|id| self.actual.to_json(id)),
        };
        self.divergences.push(divergence);
    }

    fn run(mut self) -> DiffResult {
        self.stack.push(Pending::Pair {
            expected: self.expected.root(),
            actual: self.actual.root(),
            trail: None,
        });

        while let Some(pending) = self.stack.pop() {
            if self.divergences.len() >= self.limit {
                break;
            }
            match pending {
                Pending::Pair {
                    expected,
                    actual,
                    trail,
                } => self.compare_pair(expected, actual, trail),
                Pending::Missing { expected, trail } => {
                    self.record(trail, DivergenceKind::MissingEntry, Some(expected), None)
                }
                Pending::Unexpected { actual, trail } => {
                    self.record(trail, DivergenceKind::UnexpectedEntry, None, Some(actual))
                }
            }
        }

        if self.divergences.is_empty() {
            DiffResult::Equal
        } else {
            DiffResult::Diverged(self.divergences)
        }
    }

    fn compare_pair(&mut self, e: CanonId, a: CanonId, trail: Option<usize>) {
        let (expected, actual) = (self.expected, self.actual);
        match (expected.node(e), actual.node(a)) {
            (CanonNode::Null, CanonNode::Null) | (CanonNode::Cycle, CanonNode::Cycle) => {}

            (CanonNode::Scalar(x), CanonNode::Scalar(y)) => {
                if x.type_tag() != y.type_tag() {
                    let kind = DivergenceKind::TypeMismatch {
                        expected: x.type_tag().to_string(),
                        actual: y.type_tag().to_string(),
                    };
                    self.record(trail, kind, Some(e), Some(a));
                } else if x != y {
                    self.record(trail, DivergenceKind::ValueMismatch, Some(e), Some(a));
                }
            }

            (CanonNode::Opaque(x), CanonNode::Opaque(y)) => {
                if x != y {
                    self.record(trail, DivergenceKind::ValueMismatch, Some(e), Some(a));
                }
            }

            (
                CanonNode::Composite {
                    type_name: te,
                    fields: fe,
                },
                CanonNode::Composite {
                    type_name: ta,
                    fields: fa,
                },
            ) => {
                if te != ta {
                    let kind = DivergenceKind::TypeMismatch {
                        expected: te.clone(),
                        actual: ta.clone(),
                    };
                    self.record(trail, kind, Some(e), Some(a));
                    return;
                }
                let le: Vec<&str> = fe.iter().map(|(n, _)| n.as_str()).collect();
                let la: Vec<&str> = fa.iter().map(|(n, _)| n.as_str()).collect();
                let mut work = Vec::new();
                for m in merge_sorted(&le, &la) {
                    match m {
                        Merged::Both(i, j) => {
                            let t = self.child(trail, PathSegment::Field(fe[i].0.clone()));
                            work.push(Pending::Pair {
                                expected: fe[i].1,
                                actual: fa[j].1,
                                trail: t,
                            });
                        }
                        Merged::ExpectedOnly(i) => {
                            let t = self.child(trail, PathSegment::Field(fe[i].0.clone()));
                            work.push(Pending::Missing {
                                expected: fe[i].1,
                                trail: t,
                            });
                        }
                        Merged::ActualOnly(j) => {
                            let t = self.child(trail, PathSegment::Field(fa[j].0.clone()));
                            work.push(Pending::Unexpected {
                                actual: fa[j].1,
                                trail: t,
                            });
                        }
                    }
                }
                self.stack.extend(work.into_iter().rev());
            }

            (CanonNode::Sequence { items: ie }, CanonNode::Sequence { items: ia }) => {
                if ie.len() != ia.len() {
                    let kind = DivergenceKind::LengthMismatch {
                        expected: ie.len(),
                        actual: ia.len(),
                    };
                    self.record(trail, kind, Some(e), Some(a));
                }
                let common = ie.len().min(ia.len());
                for i in (0..common).rev() {
                    let t = self.child(trail, PathSegment::Index(i));
                    self.stack.push(Pending::Pair {
                        expected: ie[i],
                        actual: ia[i],
                        trail: t,
                    });
                }
            }

            (CanonNode::Mapping { entries: ee }, CanonNode::Mapping { entries: ea }) => {
                let le: Vec<&str> = ee.iter().map(|x| x.label.as_str()).collect();
                let la: Vec<&str> = ea.iter().map(|x| x.label.as_str()).collect();
                let mut work = Vec::new();
                for m in merge_sorted(&le, &la) {
                    match m {
                        Merged::Both(i, j) => {
                            let t = self.child(trail, PathSegment::Key(ee[i].label.clone()));
                            // Equal labels can still hide differently typed keys.
                            work.push(Pending::Pair {
                                expected: ee[i].key,
                                actual: ea[j].key,
                                trail: t,
                            });
                            work.push(Pending::Pair {
                                expected: ee[i].value,
                                actual: ea[j].value,
                                trail: t,
                            });
                        }
                        Merged::ExpectedOnly(i) => {
                            let t = self.child(trail, PathSegment::Key(ee[i].label.clone()));
                            work.push(Pending::Missing {
                                expected: ee[i].value,
                                trail: t,
                            });
                        }
                        Merged::ActualOnly(j) => {
                            let t = self.child(trail, PathSegment::Key(ea[j].label.clone()));
                            work.push(Pending::Unexpected {
                                actual: ea[j].value,
                                trail: t,
                            });
                        }
                    }
                }
                self.stack.extend(work.into_iter().rev());
            }

            (x, y) => {
                let kind = DivergenceKind::KindMismatch {
                    expected: x.kind_name().to_string(),
                    actual: y.kind_name().to_string(),
                };
                self.record(trail, kind, Some(e), Some(a));
            }
        }
    }
}

/// Compare two canonical trees.
///
/// Cycle markers are equal to each other regardless of which ancestor they
/// stand for. Recording stops after `max_divergences` entries (at least one
/// is always recorded when the trees differ).
pub fn compare(
    expected: &CanonicalTree,
    actual: &CanonicalTree,
    max_divergences: usize,
) -> DiffResult {
    Comparator {
        expected,
        actual,
        trails: Vec::new(),
        stack: Vec::new(),
        divergences: Vec::new(),
        limit: max_divergences.max(1),
    }
    .run()
}
