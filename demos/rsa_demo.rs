use edu_primitives::rsa;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // far too small for anything but a demonstration
    let keys = rsa::generate_keypair(8)?;

    let message = "HELLO";
    println!("Original Message: {}", message);

    let encrypted = rsa::encrypt_message(keys.public(), message)?;
    let shown: Vec<String> = encrypted.iter().map(|c| c.to_string()).collect();
    println!("Encrypted Message: [{}]", shown.join(", "));

    let decrypted = rsa::decrypt_message(keys.private(), &encrypted)?;
    println!("Decrypted Message: {}", decrypted);
    Ok(())
}
