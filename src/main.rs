use facsimile::{
    check_hash_contract, copy, Archive, Circle, CopyMode, Drawing, Employee, Equivalence,
    FacsimileResult, Properties, Shape, Triangle, Triple,
};
use tracing_subscriber::EnvFilter;

fn main() -> FacsimileResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    copy_demo()?;
    equivalence_demo();
    archive_demo()?;
    shape_demo();

    Ok(())
}

fn copy_demo() -> FacsimileResult<()> {
    let props: Properties = [("salary", "10000"), ("city", "Bangalore"), ("title", "CEO")]
        .into_iter()
        .collect();
    let emp = Employee::new(1, "Pankaj").with_properties(props);

    let shallow = copy(&emp, CopyMode::Shallow)?;
    let deep = copy(&emp, CopyMode::Deep)?;

    if let Some(props) = emp.properties() {
        props.insert("title", "CFO");
        props.insert("city", "New York");
    }

    println!("emp props: {:?}", emp.properties());
    println!("shallow clone props: {:?}", shallow.properties());
    println!("deep clone props: {:?}", deep.properties());

    if let Err(err) = copy(&Employee::new(2, "Lisa"), CopyMode::Deep) {
        println!("deep copy without properties: {}", err);
    }

    Ok(())
}

fn equivalence_demo() {
    let left = Triple::new("X", "1", "2");
    let right = Triple::new("x", "9", "9");

    println!(
        "{:?} equivalent to {:?}: {}",
        left,
        right,
        left.equivalent(&right)
    );

    if let Err(violation) = check_hash_contract(&left, &right) {
        println!("hash contract: {}", violation);
    }
}

fn archive_demo() -> FacsimileResult<()> {
    let dir = std::env::temp_dir().join("facsimile-demo");
    std::fs::create_dir_all(&dir)?;
    let archive = Archive::new(dir.join("employee.ser"));

    archive.store(&Employee::new(100, "Pankaj"))?;
    println!("Completed");

    let restored = archive.load()?;
    println!("restored: {:?}", restored);

    Ok(())
}

fn shape_demo() {
    let mut drawing = Drawing::new();
    drawing.add(Triangle);
    drawing.add(Triangle);
    drawing.add(Circle);

    for line in drawing.draw("red") {
        println!("{}", line);
    }
}
