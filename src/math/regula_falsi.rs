use crate::constants::MaxIterNumber;

/// Regula falsi (Illinois-type) search of `x` such that `f(x) = target`
/// between `x1` and `x2`, whose function values `f1`, `f2` are already known.
/// Ends once the interval has shrunk below `eps`.
/// The tolerance is relaxed by a factor 10 every 20 evaluations,
/// and the search gives up after [MaxIterNumber::REGULA_FALSI] evaluations.
/// Returns None when the root is not bracketed.
pub(crate) fn regula_falsi<F: Fn(f64) -> f64>(
    x1: f64,
    x2: f64,
    f1: f64,
    f2: f64,
    eps: f64,
    target: f64,
    f: F,
) -> Option<f64> {
    let (mut x1, mut x2) = (x1, x2);
    let (mut f1, mut f2) = (f1 - target, f2 - target);

    if f1 * f2 > 0.0 {
        return None;
    }

    let mut ep = eps;
    let mut ng = 2.0_f64;
    let mut evaluations = 0;
    let mut k = false;
    let mut left;
    let mut l1 = false;

    let mut x = if f2 == f1 {
        (x1 + x2) / 2.0
    } else {
        (x1 * f2 - x2 * f1) / (f2 - f1)
    };

    for _ in 0..MaxIterNumber::REGULA_FALSI {
        let fx = f(x) - target;
        evaluations += 1;
        if evaluations > 20 {
            ep *= 10.0;
            evaluations = 0;
        }

        left = f1 * fx > 0.0;
        k = !k;

        if left {
            x1 = x;
            f1 = fx;
        } else {
            x2 = x;
            f2 = fx;
        }

        if (x2 - x1).abs() <= ep {
            return Some(x);
        }

        if k {
            // bisection-like step, biased toward the side that did not move
            l1 = left;
            let mut dx = (x2 - x1) / ng;
            if !left {
                dx *= ng - 1.0;
            }
            x = x1 + dx;
        } else {
            if left != l1 {
                ng *= 2.0;
            }
            x = if f2 == f1 {
                (x1 + x2) / 2.0
            } else {
                (x1 * f2 - x2 * f1) / (f2 - f1)
            };
        }
    }
    None
}
