//! Expected traces.

use crate::{DiffError, Template, TraceVars};

/// Dry run of binding `golang.org/x/mobile/asset` for `android/arm` into
/// `asset.aar` with `-x`, NDK at `/NDK`, and the Android SDK home, gomobile
/// dir and GOPATH substituted.
pub const BIND_ANDROID: &str = r#"GOMOBILE={{gopath}}/pkg/gomobile
WORK=$WORK
mkdir -p $WORK/gomobile_bind
mkdir -p $WORK/gen/src/Java
GOOS=android GOARCH=arm CC=/NDK/toolchains/llvm/prebuilt/{{goos}}-{{ndk_arch}}/bin/clang{{exe}} CXX=/NDK/toolchains/llvm/prebuilt/{{goos}}-{{ndk_arch}}/bin/clang++{{exe}} CGO_CFLAGS=-target armv7a-none-linux-androideabi --sysroot /NDK/platforms/android-15/arch-arm -gcc-toolchain /NDK/toolchains/arm-linux-androideabi-4.9/prebuilt/{{goos}}-{{ndk_arch}} -I$GOMOBILE/include CGO_CPPFLAGS=-target armv7a-none-linux-androideabi --sysroot /NDK/platforms/android-15/arch-arm -gcc-toolchain /NDK/toolchains/arm-linux-androideabi-4.9/prebuilt/{{goos}}-{{ndk_arch}} -I$GOMOBILE/include CGO_LDFLAGS=-target armv7a-none-linux-androideabi --sysroot /NDK/platforms/android-15/arch-arm -gcc-toolchain /NDK/toolchains/arm-linux-androideabi-4.9/prebuilt/{{goos}}-{{ndk_arch}} -L/NDK/platforms/android-15/arch-arm/usr/lib -L$GOMOBILE/lib/arm CGO_ENABLED=1 GOARM=7 GOPATH=$WORK/gen{{path_list_sep}}$GOPATH go install -pkgdir=$GOMOBILE/pkg_android_arm -x -gcflags=-shared -ldflags=-shared golang.org/x/mobile/asset
mkdir -p $WORK/android/src/main/java/{{java_pkg_dir}}
{{gobind_java_cmd}} -outdir=$WORK/android/src/main/java/{{java_pkg_dir}} golang.org/x/mobile/asset
mkdir -p $WORK/android/src/main/java/go
{{gobind_java_cmd}} -outdir=$WORK/android/src/main/java/go
mkdir -p $WORK/gomobile_bind
gobind -lang=go -outdir=$WORK/gomobile_bind golang.org/x/mobile/asset
mkdir -p $WORK/gomobile_bind
gobind -lang=go -outdir=$WORK/gomobile_bind
mkdir -p $WORK/androidlib
write $WORK/androidlib/main.go
mkdir -p $WORK/gomobile_bind
cp $GOPATH/src/golang.org/x/mobile/bind/java/seq_android.go.support $WORK/gomobile_bind/seq_android.go
cp $GOPATH/src/golang.org/x/mobile/bind/java/seq_android.c.support $WORK/gomobile_bind/seq_android.c
cp $GOPATH/src/golang.org/x/mobile/bind/java/seq.h $WORK/gomobile_bind/seq.h
cp $GOPATH/src/golang.org/x/mobile/bind/seq.go.support $WORK/gomobile_bind/seq.go
mkdir -p $WORK/android/src/main/jniLibs/armeabi-v7a
GOOS=android GOARCH=arm CC=/NDK/toolchains/llvm/prebuilt/{{goos}}-{{ndk_arch}}/bin/clang{{exe}} CXX=/NDK/toolchains/llvm/prebuilt/{{goos}}-{{ndk_arch}}/bin/clang++{{exe}} CGO_CFLAGS=-target armv7a-none-linux-androideabi --sysroot /NDK/platforms/android-15/arch-arm -gcc-toolchain /NDK/toolchains/arm-linux-androideabi-4.9/prebuilt/{{goos}}-{{ndk_arch}} -I$GOMOBILE/include CGO_CPPFLAGS=-target armv7a-none-linux-androideabi --sysroot /NDK/platforms/android-15/arch-arm -gcc-toolchain /NDK/toolchains/arm-linux-androideabi-4.9/prebuilt/{{goos}}-{{ndk_arch}} -I$GOMOBILE/include CGO_LDFLAGS=-target armv7a-none-linux-androideabi --sysroot /NDK/platforms/android-15/arch-arm -gcc-toolchain /NDK/toolchains/arm-linux-androideabi-4.9/prebuilt/{{goos}}-{{ndk_arch}} -L/NDK/platforms/android-15/arch-arm/usr/lib -L$GOMOBILE/lib/arm CGO_ENABLED=1 GOARM=7 GOPATH=$WORK/gen{{path_list_sep}}$GOPATH go build -pkgdir=$GOMOBILE/pkg_android_arm -x -buildmode=c-shared -o=$WORK/android/src/main/jniLibs/armeabi-v7a/libgojni.so $WORK/androidlib/main.go
rm $WORK/android/src/main/java/go/Seq.java
ln -s $GOPATH/src/golang.org/x/mobile/bind/java/Seq.java $WORK/android/src/main/java/go/Seq.java
rm $WORK/android/src/main/java/go/LoadJNI.java
ln -s $GOPATH/src/golang.org/x/mobile/bind/java/LoadJNI.java $WORK/android/src/main/java/go/LoadJNI.java
mkdir -p $WORK/javac-output
PWD=$WORK/android/src/main/java javac -d $WORK/javac-output -source 1.7 -target 1.7 -bootclasspath {{android_platform}}/android.jar *.java
mkdir -p $WORK/aar
jar c -C $WORK/javac-output . > $WORK/aar/classes.jar
write $WORK/aar/AndroidManifest.xml
write $WORK/aar/R.txt
mkdir -p $WORK/aar/res
mkdir -p $WORK/aar/jni/armeabi-v7a
cp $WORK/android/src/main/jniLibs/armeabi-v7a/libgojni.so $WORK/aar/jni/armeabi-v7a/libgojni.so
jar cMf asset.aar -C $WORK/aar .
"#;

/// Render [`BIND_ANDROID`] with `vars`.
///
/// # Errors
///
/// Fails only if the template and [`TraceVars`] disagree on a name.
pub fn bind_android(vars: &TraceVars) -> Result<String, DiffError> {
    Template::parse(BIND_ANDROID)?.render(&vars.to_map())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_uses_only_known_variables() {
        let template = Template::parse(BIND_ANDROID).unwrap();
        let known: Vec<String> = TraceVars {
            goos: String::new(),
            ndk_arch: String::new(),
            exe: String::new(),
            android_platform: String::new(),
            gobind_java_cmd: String::new(),
            java_pkg_dir: String::new(),
            gopath: String::new(),
            path_list_sep: String::new(),
        }
        .to_map()
        .into_keys()
        .collect();
        for name in template.variables() {
            assert!(known.iter().any(|k| k == name), "{name}");
        }
    }
}
