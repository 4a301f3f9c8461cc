use super::line_2d::Line2;
use super::{Point2, DEFAULT_EPSILON};

/// Enriches an open polygonal chain with a point at every line crossing.
#[must_use]
pub fn enrich_open_chain(chain: &[Point2], splitting_line: &Line2) -> Vec<Point2> {
    enrich_chain(chain, splitting_line, DEFAULT_EPSILON, true)
}

/// Enriches a closed polygonal chain with a point at every line crossing.
///
/// The chain is assumed closed without a repeated first point at its end.
#[must_use]
pub fn enrich_closed_chain(chain: &[Point2], splitting_line: &Line2) -> Vec<Point2> {
    enrich_chain(chain, splitting_line, DEFAULT_EPSILON, false)
}

/// Enriches a polygonal chain with a new point wherever the splitting line
/// crosses it.
///
/// Chain vertices are classified by the signed determinant against the line;
/// determinants with `det * det < epsilon` are snapped to exact zero so that
/// points already on the line never produce an extra insertion. A crossing is
/// inserted between consecutive vertices whose snapped determinants have
/// opposite signs.
#[must_use]
pub fn enrich_chain(chain: &[Point2], splitting_line: &Line2, epsilon: f64, open: bool) -> Vec<Point2> {
    let chain_size = chain.len();
    if chain_size < 2 {
        return chain.to_vec();
    }
    let mut enriched = Vec::with_capacity(chain_size + 4);

    let dets: Vec<f64> = chain
        .iter()
        .map(|point| {
            let det = splitting_line.matrix_det(point);
            // Snapped zeros are later compared against exact zero.
            if det * det < epsilon {
                0.0
            } else {
                det
            }
        })
        .collect();

    // An open chain iterates one segment fewer than a closed one.
    let loop_size = if open { chain_size - 1 } else { chain_size };

    for i in 0..loop_size {
        let begin = chain[i];
        let end = chain[(i + 1) % chain_size];
        let begin_det = dets[i];
        let end_det = dets[(i + 1) % chain_size];

        enriched.push(begin);

        if begin_det == 0.0 || end_det == 0.0 {
            // An endpoint already lies on the splitting line.
            continue;
        }
        if begin_det * end_det < 0.0 {
            if let Some(crossing) = splitting_line.cross_segment_line(&begin, &end, epsilon) {
                enriched.push(crossing);
            }
        }
    }

    if open {
        enriched.push(chain[chain_size - 1]);
    }

    enriched
}
