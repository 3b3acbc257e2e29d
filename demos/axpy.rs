use lanekit::{axpy, kernel, matmul, Kernel, Matrix};

fn main() -> lanekit::Result<()> {
    println!("AXPY (A*X Plus Y) Example");
    println!("========================\n");
    println!("kernel = {}\n", kernel().name());

    let alpha = 2.5;
    let x: Vec<f32> = (1..=10).map(|i| i as f32).collect();
    let mut y: Vec<f32> = (1..=10).map(|i| i as f32 * 0.5).collect();
    let original = y.clone();

    println!("alpha = {}", alpha);
    println!("x = {:?}", x);
    println!("y = {:?}", y);

    axpy(&mut y, &x, alpha)?;

    println!("\nResult (y += alpha * x):");
    println!("y = {:?}", y);

    // The first 8 elements go through the fused bulk path, the rest through the tail.
    println!("\nStep-by-step:");
    for i in 0..x.len() {
        let path = if i < x.len() - x.len() % 8 { "bulk" } else { "tail" };
        println!("  [{path}] {} * {} + {} = {}", alpha, x[i], original[i], y[i]);
    }

    println!("\nMatrix multiply (accumulating)");
    println!("==============================\n");

    let m = Matrix::new(2, 3, Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))?;
    let n = Matrix::new(3, 2, Some(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]))?;
    let mut out = Matrix::bias(2, 2)?;

    println!("m = {}", m);
    println!("n = {}", n);
    println!("out = {}", out);

    matmul(&mut out, &m, &n)?;
    println!("\nout += m · n");
    println!("out = {}", out);

    Ok(())
}
