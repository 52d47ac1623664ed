//! Interior stencils as symbolic expressions in the neighbour values `y_l`, `y_c`, `y_r`.
//! Used for display and for checking the hand-written Jacobian rows.
use RustedSciThe::symbolic::symbolic_engine::Expr;

fn neighbours() -> (Expr, Expr, Expr) {
    (
        Expr::Var("y_l".to_owned()),
        Expr::Var("y_c".to_owned()),
        Expr::Var("y_r".to_owned()),
    )
}

/// c*(y_l - 2*y_c + y_r)
fn diffusion(c: f64) -> Expr {
    let (y_l, y_c, y_r) = neighbours();
    Expr::Const(c) * (y_l - Expr::Const(2.0) * y_c + y_r)
}

/// c*(y_l - 2*y_c + y_r) + k*(y_inf - y_c)
pub fn heat_stencil(c: f64, lateral_cooling: f64, lateral_ambient: f64) -> Expr {
    let (_, y_c, _) = neighbours();
    diffusion(c) + Expr::Const(lateral_cooling) * (Expr::Const(lateral_ambient) - y_c)
}

/// (y_r^2 - y_l^2)/(4*dx) + c*(y_l - 2*y_c + y_r)
pub fn burgers_stencil(c: f64, delta_x: f64) -> Expr {
    let (y_l, _, y_r) = neighbours();
    let convective = (Expr::Pow(Box::new(y_r), Box::new(Expr::Const(2.0)))
        - Expr::Pow(Box::new(y_l), Box::new(Expr::Const(2.0))))
        / Expr::Const(4.0 * delta_x);
    convective + diffusion(c)
}
